// lib.rs - Pattern codec and playback loop for the 16x16 hardware Game of Life

pub mod codec;
pub mod config;
pub mod error;
pub mod grid;
pub mod pattern_file;
pub mod patterns;
pub mod playback;
pub mod player;
pub mod simulator;
pub mod source;

pub use codec::{FrameFormat, decode, encode, normalize};
pub use config::Config;
pub use error::{CodecError, ConfigError, Error, Result};
pub use grid::{CELL_COUNT, EMPTY_GRID, GRID_HEIGHT, GRID_WIDTH, TGrid};
pub use patterns::{PATTERNS, Pattern, Seed};
pub use playback::{Phase, PlaybackState, Tick, tick};
pub use player::{Renderer, Ticker, play};
pub use simulator::{SimStatus, SimulationRun, Simulator, SimulatorCommand};
pub use source::{FileSource, FrameSource};
