// grid_view.rs - Painter for a 16x16 field, shared by the editor and the player

use egui::{Color32, Rect, Sense, Stroke, Ui, Vec2};
use gol_sim::{Config, GRID_HEIGHT, GRID_WIDTH, TGrid};

pub struct GridStyle {
    pub cell_size: f32,
    pub live_color: Color32,
    pub dead_color: Color32,
}

impl GridStyle {
    pub fn from_config(config: &Config) -> Self {
        let [lr, lg, lb] = config.live_color;
        let [dr, dg, db] = config.dead_color;
        Self {
            cell_size: config.cell_size.max(4.0),
            live_color: Color32::from_rgb(lr, lg, lb),
            dead_color: Color32::from_rgb(dr, dg, db),
        }
    }
}

/// Draws `grid` and returns the (row, col) under a click, if `sense` allows clicks.
pub fn paint_grid(ui: &mut Ui, grid: &TGrid, style: &GridStyle, sense: Sense) -> Option<(usize, usize)> {
    let spacing = 1.0;
    let box_size = style.cell_size - spacing;
    let total_size = Vec2::new(
        style.cell_size * GRID_WIDTH as f32,
        style.cell_size * GRID_HEIGHT as f32,
    );

    let (response, painter) = ui.allocate_painter(total_size, sense);
    let start_pos = response.rect.min;

    // Fill background
    painter.rect_filled(response.rect, 0.0, Color32::BLACK);

    for (row, cells) in grid.iter().enumerate() {
        for (col, &alive) in cells.iter().enumerate() {
            let x = start_pos.x + col as f32 * style.cell_size;
            let y = start_pos.y + row as f32 * style.cell_size;
            let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(box_size));

            let cell_color = if alive { style.live_color } else { style.dead_color };
            painter.rect_filled(rect, 0.0, cell_color);
            painter.rect_stroke(rect, 0.0, Stroke::new(0.3, Color32::GRAY));
        }
    }

    if !response.clicked() {
        return None;
    }
    let pos = response.interact_pointer_pos()?;
    let offset = pos - start_pos;
    if offset.x < 0.0 || offset.y < 0.0 {
        return None;
    }
    let col = (offset.x / style.cell_size) as usize;
    let row = (offset.y / style.cell_size) as usize;
    (row < GRID_HEIGHT && col < GRID_WIDTH).then_some((row, col))
}
