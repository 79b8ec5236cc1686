// viewer.rs - Plays the simulator output, one frame per tick

use std::time::Instant;

use egui::{Color32, Context, Sense, Ui};
use gol_sim::grid::population;
use gol_sim::{Config, EMPTY_GRID, FileSource, Phase, PlaybackState, TGrid, Tick, Ticker, tick};
use tracing::info;

use crate::grid_view::{GridStyle, paint_grid};

pub struct PlaybackView {
    state: PlaybackState,
    source: FileSource,
    ticker: Ticker,
    shown: Option<(usize, TGrid)>, // Last rendered frame
    rejected: Option<String>,
    style: GridStyle,
}

impl PlaybackView {
    pub fn new(config: &Config) -> Self {
        let source = FileSource::new(config.output_path(), config.frame_format);
        info!(path = %source.path().display(), "playback view opened");
        Self {
            state: PlaybackState::new(),
            source,
            ticker: Ticker::new(config.update_interval()),
            shown: None,
            rejected: None,
            style: GridStyle::from_config(config),
        }
    }

    pub fn stop(&mut self) {
        if self.state.phase() != Phase::Stopped {
            self.state.stop();
            info!(frames = self.state.frames().len(), "playback stopped");
        }
    }

    fn advance(&mut self, now: Instant) {
        if !self.ticker.due(now) {
            return;
        }
        let (state, outcome) = tick(std::mem::take(&mut self.state), &mut self.source);
        self.state = state;
        match outcome {
            Tick::Display { index, grid } | Tick::Hold { index, grid } => {
                self.shown = Some((index, grid));
                self.rejected = None;
            }
            Tick::Rejected { index, error } => {
                self.rejected = Some(format!("Frame {index} rejected: {error}"));
            }
            Tick::Waiting | Tick::Stopped => {}
        }
    }

    /// Returns true when the user asked to go back to setup.
    pub fn show(&mut self, ctx: &Context, ui: &mut Ui) -> bool {
        let now = Instant::now();
        self.advance(now);
        if self.state.phase() != Phase::Stopped {
            ctx.request_repaint_after(self.ticker.remaining(Instant::now()));
        }

        let mut back = false;
        ui.horizontal(|ui| {
            if ui.button("Back").clicked() {
                back = true;
            }

            ui.separator();

            let mut interval_ms = self.ticker.interval().as_millis() as u64;
            ui.label("Interval:");
            if ui
                .add(egui::Slider::new(&mut interval_ms, 20..=2000).suffix(" ms").logarithmic(true))
                .changed()
            {
                self.ticker.set_interval(std::time::Duration::from_millis(interval_ms));
            }
        });

        ui.separator();

        let (label, grid) = match &self.shown {
            Some((index, grid)) => (
                format!("Frame {} of {}", index + 1, self.state.frames().len()),
                *grid,
            ),
            None => ("Waiting for simulator output...".to_string(), EMPTY_GRID),
        };
        let phase = match self.state.phase() {
            Phase::Idle => "idle",
            Phase::Displaying => "playing",
            Phase::Holding => "holding last frame",
            Phase::Stopped => "stopped",
        };
        ui.label(format!("{label} ({phase})"));
        if let Some(msg) = &self.rejected {
            ui.colored_label(Color32::RED, msg);
        }

        paint_grid(ui, &grid, &self.style, Sense::hover());

        ui.separator();
        ui.label(format!("Live cells: {}", population(&grid)));

        back
    }
}
