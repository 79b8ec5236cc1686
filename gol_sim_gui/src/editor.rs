// editor.rs - Click-to-toggle editor for the Custom pattern

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use egui::{Context, Sense};
use gol_sim::grid::{population, random_grid, toggle_cell};
use gol_sim::pattern_file::read_pattern;
use gol_sim::{EMPTY_GRID, TGrid};
use tracing::warn;

use crate::grid_view::{GridStyle, paint_grid};

const RANDOM_FILL_RATE: f64 = 0.3;

pub enum EditorAction {
    Editing,
    Save(TGrid),
    Cancel,
}

pub struct PatternEditor {
    grid: TGrid,
    message: Option<String>,
}

impl PatternEditor {
    pub fn new(grid: TGrid) -> Self {
        Self { grid, message: None }
    }

    pub fn show(&mut self, ctx: &Context, style: &GridStyle, input_path: &Path) -> EditorAction {
        let mut open = true;
        let mut action = EditorAction::Editing;

        egui::Window::new("Custom Pattern Editor")
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label("Click on cells to toggle them alive/dead");
                ui.separator();

                if let Some((row, col)) = paint_grid(ui, &self.grid, style, Sense::click()) {
                    toggle_cell(&mut self.grid, row, col);
                }

                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("Clear").clicked() {
                        self.grid = EMPTY_GRID;
                    }

                    if ui.button("Randomize").clicked() {
                        let seed = SystemTime::now()
                            .duration_since(UNIX_EPOCH)
                            .map(|d| d.as_nanos() as u64)
                            .unwrap_or_default();
                        self.grid = random_grid(seed, RANDOM_FILL_RATE);
                    }

                    if ui.button("Load Current Input").clicked() {
                        match read_pattern(input_path) {
                            Ok(grid) => {
                                self.grid = grid;
                                self.message = None;
                            }
                            Err(e) => {
                                warn!(error = %e, "could not load input into editor");
                                self.message = Some(e.to_string());
                            }
                        }
                    }

                    ui.separator();
                    ui.label(format!("Live cells: {}", population(&self.grid)));
                });

                if let Some(msg) = &self.message {
                    ui.colored_label(egui::Color32::RED, msg);
                }

                if ui.button("OK").clicked() {
                    action = EditorAction::Save(self.grid);
                }
            });

        if !open {
            action = EditorAction::Cancel;
        }
        action
    }
}
