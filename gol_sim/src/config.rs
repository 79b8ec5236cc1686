use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::codec::FrameFormat;
use crate::error::ConfigError;
use crate::simulator::SimulatorCommand;

/// Settings shared by the setup and playback views.
///
/// Every field has a default, so a config file only needs the keys it
/// changes. Relative file names are resolved against `working_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub working_dir: PathBuf,
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub simulator: SimulatorCommand,
    pub update_interval_ms: u64,
    pub frame_format: FrameFormat,
    pub cell_size: f32,
    pub live_color: [u8; 3],
    pub dead_color: [u8; 3],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            input_file: PathBuf::from("user_input.txt"),
            output_file: PathBuf::from("sim_output.txt"),
            simulator: SimulatorCommand::default(),
            update_interval_ms: 200,
            frame_format: FrameFormat::Hex,
            cell_size: 30.0,
            live_color: [255, 255, 255],
            dead_color: [30, 30, 30],
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.simulator.program.trim().is_empty() {
            return Err(ConfigError::EmptyProgram);
        }
        Ok(())
    }

    pub fn input_path(&self) -> PathBuf {
        self.working_dir.join(&self.input_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.working_dir.join(&self.output_file)
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_simulator_layout() {
        let config = Config::default();
        assert_eq!(config.update_interval(), Duration::from_millis(200));
        assert_eq!(config.input_path(), Path::new("./user_input.txt"));
        assert_eq!(config.output_path(), Path::new("./sim_output.txt"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::parse(
            r#"
            working_dir = "/tmp/conway_gol/run"
            update_interval_ms = 50
            frame_format = "binary"

            [simulator]
            args = ["-c", "-do", "do other.tcl"]
            "#,
        )
        .unwrap();
        assert_eq!(config.output_path(), Path::new("/tmp/conway_gol/run/sim_output.txt"));
        assert_eq!(config.update_interval_ms, 50);
        assert_eq!(config.frame_format, FrameFormat::Binary);
        assert_eq!(config.simulator.program, "vsim");
        assert_eq!(config.simulator.args[2], "do other.tcl");
        assert_eq!(config.cell_size, 30.0);
    }

    #[test]
    fn load_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gol_sim.toml");

        assert!(matches!(Config::load(&path), Err(ConfigError::Read { .. })));

        fs::write(&path, "update_interval_ms = \"fast\"").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));

        fs::write(&path, "update_interval_ms = 0").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::ZeroInterval)));

        fs::write(&path, "[simulator]\nprogram = \"\"").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::EmptyProgram)));
    }
}
