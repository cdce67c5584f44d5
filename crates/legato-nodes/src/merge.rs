//! MIDI merge: combine several MIDI streams into one.

use legato_core::{BlockInputs, MidiBuffer, MidiOperator};

pub const MIN_MERGE_INPUTS: usize = 2;
pub const MAX_MERGE_INPUTS: usize = 8;

/// Merges the due events of up to [`MAX_MERGE_INPUTS`] inputs.
///
/// Events are re-sorted by frame. Events on the same frame come out in input order,
/// then in each input's own order. Connected inputs beyond the configured count are
/// ignored; unconnected ones count as empty.
pub struct MidiMerge {
    inputs: usize,
    out: MidiBuffer,
}

impl MidiMerge {
    pub const NAME: &'static str = "midi_merge";

    /// `inputs` is clamped to `MIN_MERGE_INPUTS..=MAX_MERGE_INPUTS`.
    pub fn new(inputs: usize, out: MidiBuffer) -> Self {
        Self {
            inputs: inputs.clamp(MIN_MERGE_INPUTS, MAX_MERGE_INPUTS),
            out,
        }
    }

    #[inline]
    pub fn inputs(&self) -> usize {
        self.inputs
    }
}

impl MidiOperator for MidiMerge {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.out.advance_block();
        for input in inputs.midi.iter().take(self.inputs) {
            for &packet in input.in_block() {
                self.out.push(packet);
            }
        }
    }

    fn output(&self) -> &MidiBuffer {
        &self.out
    }

    fn reset(&mut self) {
        self.out.reset();
    }
}
