// app.rs - One window, two modes: setup and playback

use eframe::egui;
use gol_sim::Config;
use tokio::runtime::Runtime;
use tracing::info;

use crate::setup::{SetupAction, SetupView};
use crate::viewer::PlaybackView;

enum Mode {
    Setup,
    Playback(PlaybackView),
}

pub struct SimulatorApp {
    config: Config,
    runtime: Runtime, // Hosts the background simulator runs
    setup: SetupView,
    mode: Mode,
}

impl SimulatorApp {
    pub fn new(config: Config, runtime: Runtime, start_in_playback: bool) -> Self {
        let mode = if start_in_playback {
            Mode::Playback(PlaybackView::new(&config))
        } else {
            Mode::Setup
        };
        Self {
            config,
            runtime,
            setup: SetupView::default(),
            mode,
        }
    }
}

impl eframe::App for SimulatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let handle = self.runtime.handle().clone();

        let next = egui::CentralPanel::default()
            .show(ctx, |ui| match &mut self.mode {
                Mode::Setup => match self.setup.show(ctx, ui, &self.config, &handle) {
                    SetupAction::Play => Some(Mode::Playback(PlaybackView::new(&self.config))),
                    SetupAction::None => None,
                },
                Mode::Playback(view) => {
                    if view.show(ctx, ui) {
                        view.stop();
                        Some(Mode::Setup)
                    } else {
                        None
                    }
                }
            })
            .inner;

        if let Some(mode) = next {
            info!(
                mode = if matches!(mode, Mode::Setup) { "setup" } else { "playback" },
                "mode changed"
            );
            self.mode = mode;
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Mode::Playback(view) = &mut self.mode {
            view.stop();
        }
    }
}
