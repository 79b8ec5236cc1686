//! Launches the external HDL simulator in the background.
//!
//! The simulator reads the pattern file and appends frames to the output
//! file on its own; nothing here looks at its stdout. Callers only observe
//! [`SimStatus`] through a watch channel.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for SimulatorCommand {
    fn default() -> Self {
        // ModelSim in console mode running the testbench do-file
        Self {
            program: "vsim".into(),
            args: vec!["-c".into(), "-do".into(), "do tb_do_file.tcl".into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimStatus {
    Idle,
    Running,
    Complete,
    Failed { code: Option<i32> },
    NotFound { program: String },
    Error(String),
}

impl SimStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, SimStatus::Running)
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self, SimStatus::Idle | SimStatus::Running)
    }

    pub fn message(&self) -> String {
        match self {
            SimStatus::Idle => "Waiting for input".into(),
            SimStatus::Running => "Simulation running...".into(),
            SimStatus::Complete => "Simulation complete.".into(),
            SimStatus::Failed { code: Some(code) } => format!("Simulation failed (exit code {code})."),
            SimStatus::Failed { code: None } => "Simulation failed.".into(),
            SimStatus::NotFound { program } => {
                format!("'{program}' not found. Check the simulator installation.")
            }
            SimStatus::Error(msg) => format!("Simulation error: {msg}"),
        }
    }
}

/// One background simulator run.
pub struct SimulationRun {
    status: watch::Receiver<SimStatus>,
    task: JoinHandle<()>,
}

impl SimulationRun {
    pub fn status(&self) -> SimStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SimStatus> {
        self.status.clone()
    }

    /// Waits for the process to exit and returns its final status.
    pub async fn finished(mut self) -> SimStatus {
        let _ = self.status.wait_for(SimStatus::is_finished).await;
        let status = self.status.borrow().clone();
        let _ = self.task.await;
        status
    }
}

pub struct Simulator {
    command: SimulatorCommand,
    working_dir: PathBuf,
}

impl Simulator {
    pub fn new(command: SimulatorCommand, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            command,
            working_dir: working_dir.into(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Spawns the simulator on `runtime`; the run starts out `Running`.
    pub fn launch(&self, runtime: &Handle) -> SimulationRun {
        let (tx, rx) = watch::channel(SimStatus::Running);

        let mut cmd = Command::new(&self.command.program);
        cmd.args(&self.command.args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null());
        #[cfg(target_os = "windows")]
        cmd.creation_flags(winapi::um::winbase::CREATE_NO_WINDOW);

        let program = self.command.program.clone();
        info!(%program, args = ?self.command.args, dir = %self.working_dir.display(), "launching simulator");

        let task = runtime.spawn(async move {
            let status = match cmd.status().await {
                Ok(exit) if exit.success() => {
                    info!(%program, "simulator finished");
                    SimStatus::Complete
                }
                Ok(exit) => {
                    warn!(%program, code = ?exit.code(), "simulator failed");
                    SimStatus::Failed { code: exit.code() }
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    error!(%program, "simulator not found");
                    SimStatus::NotFound { program }
                }
                Err(e) => {
                    error!(%program, error = %e, "simulator could not start");
                    SimStatus::Error(e.to_string())
                }
            };
            let _ = tx.send(status);
        });

        SimulationRun { status: rx, task }
    }
}
