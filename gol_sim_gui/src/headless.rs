// headless.rs - Terminal playback driven by the async player

use std::io::Write;

use anyhow::Context;
use gol_sim::{Config, FileSource, PlaybackState, Renderer, SimStatus, Simulator, TGrid, play};
use tokio::runtime::Runtime;
use tokio::sync::watch;
use tracing::{info, warn};

/// Redraws the field in place; held frames are not redrawn.
#[derive(Default)]
struct TerminalRenderer {
    last_index: Option<usize>,
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, index: usize, grid: &TGrid) {
        if self.last_index == Some(index) {
            return;
        }
        self.last_index = Some(index);

        let mut out = String::from("\x1b[2J\x1b[H");
        out.push_str(&format!("frame {}\n", index + 1));
        for row in grid {
            for &alive in row {
                out.push_str(if alive { "██" } else { "··" });
            }
            out.push('\n');
        }
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(out.as_bytes());
        let _ = stdout.flush();
    }
}

pub fn run(runtime: &Runtime, config: &Config, simulate: bool) -> anyhow::Result<()> {
    runtime.block_on(async {
        let (stop_tx, stop_rx) = watch::channel(false);
        tokio::spawn(stop_on_interrupt(tokio::signal::ctrl_c(), stop_tx));

        if simulate {
            let simulator = Simulator::new(config.simulator.clone(), &config.working_dir);
            let run = simulator.launch(&tokio::runtime::Handle::current());
            tokio::spawn(async move {
                match run.finished().await {
                    SimStatus::Complete => info!("simulation complete"),
                    status => warn!(status = %status.message(), "simulation did not complete"),
                }
            });
        }

        play_output(config, stop_rx).await;
        Ok::<(), anyhow::Error>(())
    })
    .context("headless playback")
}

/// Sends stop once `interrupt` fires. If it cannot be listened for, the
/// sender is held forever so playback keeps running.
async fn stop_on_interrupt<F>(interrupt: F, stop_tx: watch::Sender<bool>)
where
    F: Future<Output = std::io::Result<()>>,
{
    match interrupt.await {
        Ok(()) => {
            info!("interrupt received");
            let _ = stop_tx.send(true);
        }
        Err(e) => {
            warn!(error = %e, "cannot listen for ctrl-c, playback runs until killed");
            std::future::pending::<()>().await;
        }
    }
}

async fn play_output(config: &Config, stop_rx: watch::Receiver<bool>) -> PlaybackState {
    let mut source = FileSource::new(config.output_path(), config.frame_format);
    let mut renderer = TerminalRenderer::default();
    let state = play(
        PlaybackState::new(),
        &mut source,
        &mut renderer,
        config.update_interval(),
        stop_rx,
    )
    .await;

    if state.frames().is_empty() {
        warn!(path = %config.output_path().display(), "no frames were read");
    }
    state
}
