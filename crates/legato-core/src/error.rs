//! Error types for legato-core.

use thiserror::Error;

/// Error type for legato-core operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid sample rate: {0}. Must be between 8000 and 384000 Hz")]
    InvalidSampleRate(f64),

    #[error("Invalid block size: {0}. Must be between 1 and 8192 frames")]
    InvalidBlockSize(usize),

    #[error("MIDI: {0}")]
    Midi(#[from] legato_midi::Error),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors from node registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeRegistryError {
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    #[error("Invalid parameter '{0}': {1}")]
    InvalidParameter(String, String),

    #[error("Construction failed: {0}")]
    ConstructionFailed(String),
}
