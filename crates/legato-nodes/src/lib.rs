//! Built-in MIDI operators: trigger-driven note generation and MIDI merging.
//!
//! Parameters that a control thread changes at runtime live in lock-free atomics
//! behind a handle (see [`MakeNoteHandle`]).

mod make_note;
pub use make_note::{MakeNote, MakeNoteHandle, MakeNoteParams};

mod merge;
pub use merge::{MidiMerge, MAX_MERGE_INPUTS, MIN_MERGE_INPUTS};

use legato_core::{get_param_or, NodeRegistry, NodeRegistryError};

/// Register `"make_note"` and `"midi_merge"` with `registry`.
///
/// - `make_note`: `note`, `velocity`, `off_velocity`, `channel` (ints), `duration` (seconds)
/// - `midi_merge`: `inputs` (2-8, default 2)
pub fn register_builtin_nodes(registry: &NodeRegistry) {
    registry.register(MakeNote::NAME, |config, params| {
        let defaults = MakeNoteParams::default();
        let duration = get_param_or(params, "duration", defaults.duration, |v| v.as_f64())?;
        if !duration.is_finite() || duration < 0.0 {
            return Err(NodeRegistryError::InvalidParameter(
                "duration".to_string(),
                format!("{duration} (expected seconds >= 0)"),
            ));
        }
        let node = MakeNote::with_params(
            *config,
            MakeNoteParams {
                note: get_param_or(params, "note", defaults.note, |v| v.as_i32())?,
                velocity: get_param_or(params, "velocity", defaults.velocity, |v| v.as_i32())?,
                off_velocity: get_param_or(params, "off_velocity", defaults.off_velocity, |v| {
                    v.as_i32()
                })?,
                channel: get_param_or(params, "channel", defaults.channel, |v| v.as_i32())?,
                duration,
            },
        );
        Ok(Box::new(node))
    });

    registry.register(MidiMerge::NAME, |config, params| {
        let inputs = get_param_or(params, "inputs", MIN_MERGE_INPUTS as i64, |v| v.as_i64())?;
        if !(MIN_MERGE_INPUTS as i64..=MAX_MERGE_INPUTS as i64).contains(&inputs) {
            return Err(NodeRegistryError::InvalidParameter(
                "inputs".to_string(),
                format!("{inputs} (expected {MIN_MERGE_INPUTS}-{MAX_MERGE_INPUTS})"),
            ));
        }
        Ok(Box::new(MidiMerge::new(inputs as usize, config.midi_buffer())))
    });
}
