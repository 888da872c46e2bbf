//! Error types for chordspace

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChordSpaceError {
    #[error("Dimension mismatch: {left} voices vs {right} voices")]
    DimensionMismatch { left: usize, right: usize },
    #[error("Unknown pitch name: {0}")]
    UnknownPitchName(String),
    #[error("Empty chord template: {0}")]
    EmptyTemplate(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ChordSpaceError>;
