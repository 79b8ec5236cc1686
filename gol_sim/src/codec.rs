//! Conversion between a [`TGrid`] and its one-line text form.
//!
//! Cells are flattened row-major (row 0 first, column 0 first within a
//! row), alive is `1`, dead is `0`. A hex frame carries four cells per
//! digit, so a full grid is exactly 64 digits.
//!
//! Frames of the wrong length are not errors. A short frame is padded with
//! zeros on the left (the most significant end) and a long frame keeps only
//! its first 256 bits. Characters outside the format's alphabet are always
//! rejected, wherever they occur.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::grid::{CELL_COUNT, EMPTY_GRID, GRID_WIDTH, TGrid};

/// Hex digits in a full frame.
pub const HEX_DIGITS: usize = CELL_COUNT / 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameFormat {
    /// Four cells per character, `[0-9A-Fa-f]`.
    #[default]
    Hex,
    /// One cell per character, `0` or `1`.
    Binary,
}

impl FrameFormat {
    fn bits_per_char(self) -> usize {
        match self {
            Self::Hex => 4,
            Self::Binary => 1,
        }
    }

    fn char_value(self, c: char) -> Option<u32> {
        match self {
            Self::Hex => c.to_digit(16),
            Self::Binary => c.to_digit(2),
        }
    }
}

/// Encodes a grid as 64 uppercase hex digits.
pub fn encode(grid: &TGrid) -> String {
    encode_with(grid, FrameFormat::Hex)
}

/// Decodes a hex frame.
pub fn decode(frame: &str) -> Result<TGrid, CodecError> {
    decode_with(frame, FrameFormat::Hex)
}

/// Re-encodes a hex frame so it is exactly 64 digits long.
pub fn normalize(frame: &str) -> Result<String, CodecError> {
    decode(frame).map(|grid| encode(&grid))
}

pub fn encode_with(grid: &TGrid, format: FrameFormat) -> String {
    let bits: Vec<bool> = grid.iter().flat_map(|row| row.iter().copied()).collect();
    let width = format.bits_per_char();
    bits.chunks(width)
        .map(|chunk| {
            let value = chunk.iter().fold(0u32, |acc, &b| (acc << 1) | b as u32);
            // value < 16 by construction
            char::from_digit(value, 16).map_or('0', |c| c.to_ascii_uppercase())
        })
        .collect()
}

pub fn decode_with(frame: &str, format: FrameFormat) -> Result<TGrid, CodecError> {
    let width = format.bits_per_char();

    let mut bits = Vec::with_capacity(frame.len() * width);
    for (position, found) in frame.chars().enumerate() {
        let value = format
            .char_value(found)
            .ok_or(CodecError::InvalidEncoding { position, found })?;
        for shift in (0..width).rev() {
            bits.push((value >> shift) & 1 == 1);
        }
    }

    // left zero-padding, then keep the first CELL_COUNT bits
    let pad = CELL_COUNT.saturating_sub(bits.len());
    let mut grid = EMPTY_GRID;
    for (i, bit) in std::iter::repeat(false)
        .take(pad)
        .chain(bits)
        .take(CELL_COUNT)
        .enumerate()
    {
        grid[i / GRID_WIDTH][i % GRID_WIDTH] = bit;
    }
    Ok(grid)
}
