// setup.rs - Pattern selection, input writing and simulator launch

use egui::{Color32, Context, Ui};
use gol_sim::pattern_file::write_pattern;
use gol_sim::{Config, EMPTY_GRID, PATTERNS, Seed, SimStatus, SimulationRun, Simulator, TGrid};
use tokio::runtime::Handle;
use tracing::{error, info};

use crate::editor::{EditorAction, PatternEditor};
use crate::grid_view::GridStyle;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Choice {
    Preset(usize),
    Custom,
}

pub enum SetupAction {
    None,
    Play,
}

struct Status {
    text: String,
    color: Color32,
}

impl Status {
    fn new(text: impl Into<String>, color: Color32) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

pub struct SetupView {
    choice: Option<Choice>,
    custom_grid: TGrid,
    editor: Option<PatternEditor>,
    input_ready: bool,
    run: Option<SimulationRun>,
    reported: Option<SimStatus>,
    status: Status,
    error: Option<String>,
}

impl Default for SetupView {
    fn default() -> Self {
        Self {
            choice: None,
            custom_grid: EMPTY_GRID,
            editor: None,
            input_ready: false,
            run: None,
            reported: None,
            status: Status::new("Status: Waiting for input", Color32::LIGHT_BLUE),
            error: None,
        }
    }
}

impl SetupView {
    fn provide_input(&mut self, config: &Config) {
        match self.choice {
            None => self.error = Some("Please select a pattern.".into()),
            Some(Choice::Custom) => {
                self.editor = Some(PatternEditor::new(self.custom_grid));
            }
            Some(Choice::Preset(i)) => self.write_seed(config, Seed::Preset(&PATTERNS[i])),
        }
    }

    fn write_seed(&mut self, config: &Config, seed: Seed) {
        match write_pattern(&config.input_path(), &seed) {
            Ok(_) => {
                let text = match seed {
                    Seed::Custom(_) => "Custom input written. Ready to simulate.",
                    Seed::Preset(_) => "Input written. Ready to simulate.",
                };
                self.status = Status::new(text, Color32::from_rgb(255, 165, 0));
                self.input_ready = true;
            }
            Err(e) => {
                error!(error = %e, "writing input failed");
                self.error = Some(e.to_string());
            }
        }
    }

    fn start_simulation(&mut self, config: &Config, runtime: &Handle) {
        let simulator = Simulator::new(config.simulator.clone(), &config.working_dir);
        self.run = Some(simulator.launch(runtime));
        self.reported = None;
        self.status = Status::new(SimStatus::Running.message(), Color32::from_rgb(255, 165, 0));
    }

    /// Picks up status changes of the background run.
    fn poll_simulation(&mut self) {
        let Some(run) = &self.run else { return };
        let status = run.status();
        if self.reported.as_ref() == Some(&status) {
            return;
        }
        let color = match status {
            SimStatus::Complete => Color32::GREEN,
            SimStatus::Idle | SimStatus::Running => Color32::from_rgb(255, 165, 0),
            _ => Color32::RED,
        };
        if let SimStatus::NotFound { .. } = status {
            self.error = Some(status.message());
        }
        self.status = Status::new(status.message(), color);
        self.reported = Some(status);
    }

    fn simulation_running(&self) -> bool {
        self.run.as_ref().is_some_and(|run| run.status().is_running())
    }

    pub fn show(&mut self, ctx: &Context, ui: &mut Ui, config: &Config, runtime: &Handle) -> SetupAction {
        let mut action = SetupAction::None;
        self.poll_simulation();
        if self.simulation_running() {
            ctx.request_repaint_after(config.update_interval());
        }

        ui.heading("Select Initial Pattern:");
        ui.add_space(6.0);
        for (i, pattern) in PATTERNS.iter().enumerate() {
            ui.radio_value(&mut self.choice, Some(Choice::Preset(i)), pattern.name);
        }
        ui.radio_value(&mut self.choice, Some(Choice::Custom), "Custom");

        ui.separator();

        if ui.button("Provide Input").clicked() {
            self.provide_input(config);
        }

        let can_simulate = self.input_ready && !self.simulation_running();
        if ui.add_enabled(can_simulate, egui::Button::new("Start Simulation")).clicked() {
            self.start_simulation(config, runtime);
        }

        ui.colored_label(self.status.color, &self.status.text);

        if ui.add_enabled(self.run.is_some(), egui::Button::new("Play Visualization")).clicked() {
            let output = config.output_path();
            if output.exists() {
                info!(path = %output.display(), "switching to playback");
                action = SetupAction::Play;
            } else {
                self.error = Some(format!("{} not found.", output.display()));
            }
        }

        if let Some(editor) = &mut self.editor {
            let style = GridStyle::from_config(config);
            match editor.show(ctx, &style, &config.input_path()) {
                EditorAction::Editing => {}
                EditorAction::Cancel => self.editor = None,
                EditorAction::Save(grid) => {
                    self.custom_grid = grid;
                    self.editor = None;
                    self.write_seed(config, Seed::Custom(grid));
                }
            }
        }

        if let Some(msg) = self.error.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(msg);
                    if ui.button("OK").clicked() {
                        self.error = None;
                    }
                });
        }

        action
    }
}
