//! # Legato - frame-accurate MIDI for block-based audio graphs
//!
//! ## Architecture
//!
//! Legato is an umbrella crate that coordinates:
//! - **legato-midi** - MIDI packets and the per-block event buffer (ordering, note
//!   collision handling, block rollover)
//! - **legato-core** - Block configuration, the operator trait, node registry, triggers
//! - **legato-nodes** - Built-in operators: make-note and MIDI merge
//!
//! ## Quick Start
//!
//! ```
//! use legato::prelude::*;
//!
//! let engine = LegatoEngine::builder()
//!     .sample_rate(48000.0)
//!     .block_size(64)
//!     .build()?;
//!
//! let mut buffer = engine.midi_buffer();
//!
//! // Block 1: schedule a note that ends in the next block
//! buffer.advance_block();
//! buffer.push_note(10, 80, 0, 60, 100, 0);
//! assert_eq!(buffer.num_in_block(), 1);
//!
//! // Block 2: the note-off is now due, rebased to this block
//! buffer.advance_block();
//! assert!(buffer[0].is_note_off(0, 60));
//! assert_eq!(buffer[0].frame(), 26);
//! # Ok::<(), legato::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - Buffers, registry and the built-in operators
//! - `nodes` - Built-in operators (make-note, MIDI merge)

mod error;
pub use error::{Error, Result};

/// Re-export of legato-core for direct access
pub use legato_core as core;

/// Re-export of legato-midi for direct access
pub use legato_midi as midi;

/// Built-in operators
#[cfg(feature = "nodes")]
pub use legato_nodes as nodes;

// Core types
pub use legato_core::{
    params, BlockConfig, BlockInputs, MidiOperator, NodeParamValue, NodeParams, NodeRegistry,
    NodeRegistryError, TriggerBuffer,
};

// MIDI types
pub use legato_midi::{MidiBuffer, MidiPacket, MAX_PACKET_LEN};

#[cfg(feature = "nodes")]
pub use legato_nodes::{MakeNote, MakeNoteHandle, MakeNoteParams, MidiMerge};

mod builder;
mod engine;

pub use builder::LegatoEngineBuilder;
pub use engine::LegatoEngine;

/// Convenience prelude for common imports
pub mod prelude {
    // Main engine
    pub use crate::{LegatoEngine, LegatoEngineBuilder};

    // Buffers and operators
    pub use crate::{
        params, BlockConfig, BlockInputs, MidiBuffer, MidiOperator, MidiPacket, NodeParams,
        TriggerBuffer,
    };

    #[cfg(feature = "nodes")]
    pub use crate::{MakeNote, MakeNoteHandle, MakeNoteParams, MidiMerge};
}
