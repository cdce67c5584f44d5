//! Block runtime pieces shared by legato operators.
//!
//! # Primary API
//!
//! - [`BlockConfig`]: sample rate and block size, validated once at setup
//! - [`MidiOperator`] / [`BlockInputs`]: the per-block execution contract
//! - [`NodeRegistry`]: create operators by name from a [`NodeParams`] map
//! - [`TriggerBuffer`]: sample-accurate trigger input
//!
//! MIDI types from `legato-midi` are re-exported under [`midi`] and at the crate root.

pub mod error;
pub use error::{Error, NodeRegistryError, Result};

pub mod config;
pub use config::{BlockConfig, MAX_FRAMES_PER_BLOCK};

mod operator;
pub use operator::{BlockInputs, MidiOperator};

pub mod registry;
pub use registry::{
    get_param_or, NodeConstructor, NodeParamValue, NodeParams, NodeRegistry,
};

mod trigger;
pub use trigger::TriggerBuffer;

/// Re-export of legato-midi for direct access
pub use legato_midi as midi;
pub use legato_midi::{MidiBuffer, MidiPacket};
