use crate::codec;
use crate::error::CodecError;
use crate::grid::TGrid;

pub struct Pattern {
    pub name: &'static str,
    pub hex: &'static str,
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Still Life",
        hex: "000000000000000000660000006600000006C000000C60000000000000000000",
    },
    Pattern {
        name: "Oscillator",
        hex: "0000000000000000007000000038700000700000000000000F0F000000000000",
    },
    Pattern {
        name: "Spaceship",
        hex: "000000000000800000400000E00000000000000000000000F800100080010000",
    },
    Pattern {
        name: "Methuselah",
        hex: "0000000000000000000000000000000000000000000000100061800410007800",
    },
    Pattern {
        name: "Random",
        hex: "A5A549124A8A58B3B49D084C12F03A14CA5D29C183EE0149381A432140AC5A29",
    },
];

impl Pattern {
    pub fn grid(&self) -> Result<TGrid, CodecError> {
        codec::decode(self.hex)
    }

    /// The preset as it is written to the simulator input, exactly 64 digits.
    pub fn frame(&self) -> Result<String, CodecError> {
        codec::normalize(self.hex)
    }
}

/// Looks up a built-in preset by name, ignoring case.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

/// What gets written to the simulator input: a preset or a hand-drawn grid.
#[derive(Clone, Copy)]
pub enum Seed {
    Preset(&'static Pattern),
    Custom(TGrid),
}

impl Seed {
    pub fn name(&self) -> &'static str {
        match self {
            Seed::Preset(p) => p.name,
            Seed::Custom(_) => "Custom",
        }
    }

    pub fn frame(&self) -> Result<String, CodecError> {
        match self {
            Seed::Preset(p) => p.frame(),
            Seed::Custom(grid) => Ok(codec::encode(grid)),
        }
    }
}
