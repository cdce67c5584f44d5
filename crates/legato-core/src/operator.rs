//! Block-executed MIDI operators.
//!
//! Defines the trait for graph nodes that produce a [`MidiBuffer`] every block. The host
//! graph owns scheduling and wiring; an operator only sees the inputs handed to it for
//! the current block.

use legato_midi::MidiBuffer;

/// Borrowed inputs for one `execute()` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockInputs<'a> {
    /// Trigger frames fired in this block, ascending.
    pub triggers: &'a [i32],
    /// Upstream MIDI buffers, already advanced and filled for this block.
    pub midi: &'a [&'a MidiBuffer],
}

impl<'a> BlockInputs<'a> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_triggers(mut self, triggers: &'a [i32]) -> Self {
        self.triggers = triggers;
        self
    }

    pub fn with_midi(mut self, midi: &'a [&'a MidiBuffer]) -> Self {
        self.midi = midi;
        self
    }
}

/// A graph node whose output is a MIDI buffer.
///
/// # Example
///
/// ```ignore
/// struct Thru {
///     out: MidiBuffer,
/// }
///
/// impl MidiOperator for Thru {
///     fn name(&self) -> &'static str {
///         "thru"
///     }
///
///     fn execute(&mut self, inputs: &BlockInputs<'_>) {
///         self.out.advance_block();
///         if let Some(input) = inputs.midi.first() {
///             for &packet in input.in_block() {
///                 self.out.push(packet);
///             }
///         }
///     }
///
///     fn output(&self) -> &MidiBuffer {
///         &self.out
///     }
///
///     fn reset(&mut self) {
///         self.out.reset();
///     }
/// }
/// ```
///
/// # RT-Safety
///
/// `execute()` runs on the audio thread once per block: no blocking, no logging, and no
/// allocation beyond amortized buffer growth.
pub trait MidiOperator: Send {
    /// Registry name of this operator type.
    fn name(&self) -> &'static str;

    /// Process one block. Implementations call `advance_block()` on their output first.
    fn execute(&mut self, inputs: &BlockInputs<'_>);

    /// The buffer downstream nodes read after `execute()`.
    fn output(&self) -> &MidiBuffer;

    /// Drop all scheduled events (transport or stream reset).
    fn reset(&mut self);
}
