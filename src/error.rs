//! Centralized error type for the legato umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] legato_core::Error),

    #[error("MIDI: {0}")]
    Midi(#[from] legato_midi::Error),

    #[error("Node: {0}")]
    Registry(#[from] legato_core::NodeRegistryError),
}

pub type Result<T> = std::result::Result<T, Error>;
