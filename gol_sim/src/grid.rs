// grid.rs - Grid types for the 16x16 simulator field

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const GRID_WIDTH: usize = 16;                        // Columns per row
pub const GRID_HEIGHT: usize = 16;                       // Rows in the field
pub const CELL_COUNT: usize = GRID_WIDTH * GRID_HEIGHT;  // Bits in one frame (256)

pub type TRow = [bool; GRID_WIDTH];
pub type TGrid = [TRow; GRID_HEIGHT];

pub const EMPTY_GRID: TGrid = [[false; GRID_WIDTH]; GRID_HEIGHT];

/// Number of live cells.
pub fn population(grid: &TGrid) -> usize {
    grid.iter().map(|row| row.iter().filter(|&&c| c).count()).sum()
}

/// Flips one cell. Out-of-range coordinates are ignored.
pub fn toggle_cell(grid: &mut TGrid, row: usize, col: usize) {
    if row < GRID_HEIGHT && col < GRID_WIDTH {
        grid[row][col] = !grid[row][col];
    }
}

/// A reproducible random field where each cell is alive with probability `fill_rate`.
pub fn random_grid(seed: u64, fill_rate: f64) -> TGrid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let fill_rate = fill_rate.clamp(0.0, 1.0);
    let mut grid = EMPTY_GRID;
    for row in grid.iter_mut() {
        for cell in row.iter_mut() {
            *cell = rng.gen_bool(fill_rate);
        }
    }
    grid
}
