use std::path::PathBuf;

/// Result type for file-level operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A frame string that cannot be turned into a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("invalid character {found:?} at position {position} in frame")]
    InvalidEncoding { position: usize, found: char },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The frame source could not be read on this tick.
    #[error("frame source {} unavailable: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write pattern file {}: {source}", path.display())]
    PatternWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read pattern file {}: {source}", path.display())]
    PatternRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("update interval must be positive")]
    ZeroInterval,

    #[error("simulator program is empty")]
    EmptyProgram,
}
