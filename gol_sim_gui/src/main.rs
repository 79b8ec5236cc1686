// main.rs - Game of Life seeder and player for the 16x16 HDL simulation

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;
use eframe::egui;
use gol_sim::pattern_file::write_pattern;
use gol_sim::{Config, GRID_HEIGHT, GRID_WIDTH, Seed, patterns};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod editor;
mod grid_view;
mod headless;
mod setup;
mod viewer;

use app::SimulatorApp;

#[derive(Parser, Debug)]
#[command(version, about = "Seed a 16x16 Game of Life simulation and replay its output")]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the simulator input and output files
    #[arg(long)]
    working_dir: Option<PathBuf>,

    /// Output file to play, relative to the working directory
    #[arg(long)]
    output: Option<PathBuf>,

    /// Milliseconds between frames
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Write this built-in preset to the input file before starting
    #[arg(long)]
    preset: Option<String>,

    /// Open straight into playback
    #[arg(long)]
    play: bool,

    /// Play in the terminal instead of a window
    #[arg(long)]
    headless: bool,

    /// With --headless, run the simulator before playing
    #[arg(long, requires = "headless")]
    simulate: bool,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(dir) = &cli.working_dir {
        config.working_dir = dir.clone();
    }
    if let Some(output) = &cli.output {
        config.output_file = output.clone();
    }
    if let Some(ms) = cli.interval_ms {
        config.update_interval_ms = ms;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if let Some(name) = &cli.preset {
        let pattern = patterns::find(name).with_context(|| format!("unknown preset '{name}'"))?;
        write_pattern(&config.input_path(), &Seed::Preset(pattern))?;
    }

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;

    if cli.headless {
        return headless::run(&runtime, &config, cli.simulate);
    }

    let side = config.cell_size * GRID_WIDTH.max(GRID_HEIGHT) as f32;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([side.max(400.0) + 60.0, side + 220.0]),
        ..Default::default()
    };

    info!(dir = %config.working_dir.display(), "starting");
    eframe::run_native(
        "Game of Life Simulator",
        options,
        Box::new(move |_cc| Box::new(SimulatorApp::new(config, runtime, cli.play))),
    )
    .map_err(|e| anyhow!("window failed: {e}"))
}
