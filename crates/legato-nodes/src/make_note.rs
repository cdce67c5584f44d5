//! Trigger-driven note generator.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use atomic_float::AtomicF64;
use legato_core::{BlockConfig, BlockInputs, MidiBuffer, MidiOperator};

/// Initial values for a [`MakeNote`] node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MakeNoteParams {
    /// Note number (0-127).
    pub note: i32,
    /// Note-on velocity (1-127).
    pub velocity: i32,
    /// Note-off velocity (0-127).
    pub off_velocity: i32,
    /// MIDI channel (0-15).
    pub channel: i32,
    /// Note length in seconds.
    pub duration: f64,
}

impl Default for MakeNoteParams {
    fn default() -> Self {
        Self {
            note: 63,
            velocity: 100,
            off_velocity: 0,
            channel: 0,
            duration: 0.05,
        }
    }
}

#[derive(Debug)]
struct SharedParams {
    note: AtomicI32,
    velocity: AtomicI32,
    off_velocity: AtomicI32,
    channel: AtomicI32,
    duration: AtomicF64,
}

/// Values after clamping, ready for `push_note`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ResolvedNote {
    note: u8,
    velocity: u8,
    off_velocity: u8,
    channel: u8,
    duration: i32,
}

impl SharedParams {
    fn new(params: MakeNoteParams) -> Self {
        Self {
            note: AtomicI32::new(params.note),
            velocity: AtomicI32::new(params.velocity),
            off_velocity: AtomicI32::new(params.off_velocity),
            channel: AtomicI32::new(params.channel),
            duration: AtomicF64::new(params.duration),
        }
    }

    #[inline]
    fn resolve(&self, config: &BlockConfig) -> ResolvedNote {
        ResolvedNote {
            note: self.note.load(Ordering::Relaxed).clamp(0, 127) as u8,
            velocity: self.velocity.load(Ordering::Relaxed).clamp(1, 127) as u8,
            off_velocity: self.off_velocity.load(Ordering::Relaxed).clamp(0, 127) as u8,
            channel: self.channel.load(Ordering::Relaxed).clamp(0, 15) as u8,
            duration: config.duration_to_frames(self.duration.load(Ordering::Relaxed)),
        }
    }
}

/// Control-thread handle for a [`MakeNote`] node.
///
/// Values are stored as given and clamped when the audio thread reads them.
#[derive(Debug, Clone)]
pub struct MakeNoteHandle {
    params: Arc<SharedParams>,
}

impl MakeNoteHandle {
    pub fn set_note(&self, note: i32) {
        if !(0..=127).contains(&note) {
            tracing::debug!("MakeNote note {} out of range, clamped to 0-127", note);
        }
        self.params.note.store(note, Ordering::Relaxed);
    }

    pub fn set_velocity(&self, velocity: i32) {
        if !(1..=127).contains(&velocity) {
            tracing::debug!("MakeNote velocity {} out of range, clamped to 1-127", velocity);
        }
        self.params.velocity.store(velocity, Ordering::Relaxed);
    }

    pub fn set_off_velocity(&self, velocity: i32) {
        if !(0..=127).contains(&velocity) {
            tracing::debug!("MakeNote off velocity {} out of range, clamped to 0-127", velocity);
        }
        self.params.off_velocity.store(velocity, Ordering::Relaxed);
    }

    pub fn set_channel(&self, channel: i32) {
        if !(0..=15).contains(&channel) {
            tracing::debug!("MakeNote channel {} out of range, clamped to 0-15", channel);
        }
        self.params.channel.store(channel, Ordering::Relaxed);
    }

    /// Note length in seconds. Anything shorter than one frame plays for one frame.
    pub fn set_duration(&self, seconds: f64) {
        self.params.duration.store(seconds, Ordering::Relaxed);
    }

    pub fn note(&self) -> i32 {
        self.params.note.load(Ordering::Relaxed)
    }

    pub fn velocity(&self) -> i32 {
        self.params.velocity.load(Ordering::Relaxed)
    }

    pub fn off_velocity(&self) -> i32 {
        self.params.off_velocity.load(Ordering::Relaxed)
    }

    pub fn channel(&self) -> i32 {
        self.params.channel.load(Ordering::Relaxed)
    }

    pub fn duration(&self) -> f64 {
        self.params.duration.load(Ordering::Relaxed)
    }
}

/// Emits a note for every trigger in the block.
///
/// Each trigger schedules a note-on at the trigger frame and a note-off `duration`
/// seconds later (rounded up to whole frames). Retriggering a still-sounding note cuts
/// it first, see [`MidiBuffer::push_note`].
pub struct MakeNote {
    config: BlockConfig,
    params: Arc<SharedParams>,
    out: MidiBuffer,
}

impl MakeNote {
    pub const NAME: &'static str = "make_note";

    pub fn new(config: BlockConfig) -> Self {
        Self::with_params(config, MakeNoteParams::default())
    }

    pub fn with_params(config: BlockConfig, params: MakeNoteParams) -> Self {
        Self {
            config,
            params: Arc::new(SharedParams::new(params)),
            out: config.midi_buffer(),
        }
    }

    pub fn handle(&self) -> MakeNoteHandle {
        MakeNoteHandle {
            params: Arc::clone(&self.params),
        }
    }
}

impl MidiOperator for MakeNote {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn execute(&mut self, inputs: &BlockInputs<'_>) {
        self.out.advance_block();

        if inputs.triggers.is_empty() {
            return;
        }

        let note = self.params.resolve(&self.config);
        for &start in inputs.triggers {
            self.out.push_note(
                start,
                note.duration,
                note.channel,
                note.note,
                note.velocity,
                note.off_velocity,
            );
        }
    }

    fn output(&self) -> &MidiBuffer {
        &self.out
    }

    fn reset(&mut self) {
        self.out.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config() -> BlockConfig {
        BlockConfig::new(1000.0, 64)
    }

    fn run(node: &mut MakeNote, triggers: &[i32]) {
        node.execute(&BlockInputs::empty().with_triggers(triggers));
    }

    #[test]
    fn test_no_triggers_no_output() {
        let mut node = MakeNote::new(config());
        run(&mut node, &[]);
        assert!(node.output().is_empty());
    }

    #[test]
    fn test_trigger_emits_note() {
        let mut node = MakeNote::with_params(
            config(),
            MakeNoteParams {
                note: 60,
                velocity: 90,
                off_velocity: 10,
                channel: 2,
                duration: 0.02,
            },
        );
        run(&mut node, &[5]);

        let out = node.output();
        assert_eq!(out.len(), 2);
        assert_eq!(out.num_in_block(), 2);
        assert!(out[0].is_note_on(2, 60));
        assert_eq!(out[0].frame(), 5);
        assert_eq!(out[0].bytes()[2], 90);
        assert!(out[1].is_note_off(2, 60));
        assert_eq!(out[1].frame(), 25);
        assert_eq!(out[1].bytes()[2], 10);
    }

    #[test]
    fn test_note_off_lands_in_later_block() {
        let mut node = MakeNote::with_params(
            config(),
            MakeNoteParams {
                duration: 0.1,
                ..MakeNoteParams::default()
            },
        );
        run(&mut node, &[10]);
        assert_eq!(node.output().num_in_block(), 1);

        // off at 110 -> 46 after one block
        run(&mut node, &[]);
        assert_eq!(node.output().num_in_block(), 1);
        assert!(node.output()[0].is_note_off(0, 63));
        assert_eq!(node.output()[0].frame(), 46);

        run(&mut node, &[]);
        assert!(node.output().is_empty());
    }

    #[test]
    fn test_values_are_clamped() {
        let mut node = MakeNote::new(config());
        let handle = node.handle();
        handle.set_note(200);
        handle.set_velocity(0);
        handle.set_off_velocity(-5);
        handle.set_channel(99);
        handle.set_duration(0.0);

        run(&mut node, &[0]);

        let out = node.output();
        assert_eq!(out[0].bytes(), &[0x9F, 127, 1]);
        assert_eq!(out[1].bytes(), &[0x8F, 127, 0]);
        // zero duration still lasts a frame
        assert_eq!(out[1].frame(), 1);
    }

    #[test]
    fn test_retrigger_cuts_previous_note() {
        let mut node = MakeNote::with_params(
            config(),
            MakeNoteParams {
                duration: 0.03,
                ..MakeNoteParams::default()
            },
        );
        run(&mut node, &[0, 10]);

        let frames: Vec<i32> = node.output().packets().iter().map(|p| p.frame()).collect();
        assert_eq!(frames, vec![0, 10, 10, 40]);
        assert!(node.output()[1].is_note_off(0, 63));
        assert!(node.output()[2].is_note_on(0, 63));
    }

    #[test]
    fn test_handle_round_trip() {
        let node = MakeNote::new(config());
        let handle = node.handle();
        handle.set_duration(0.25);
        handle.set_note(72);
        assert_relative_eq!(handle.duration(), 0.25);
        assert_eq!(handle.note(), 72);
        assert_eq!(handle.velocity(), 100);
        assert_eq!(handle.channel(), 0);
        assert_eq!(handle.off_velocity(), 0);
    }

    #[test]
    fn test_reset_drops_pending_off() {
        let mut node = MakeNote::with_params(
            config(),
            MakeNoteParams {
                duration: 1.0,
                ..MakeNoteParams::default()
            },
        );
        run(&mut node, &[0]);
        node.reset();
        assert!(node.output().is_empty());
        assert_eq!(node.output().num_in_block(), 0);
    }

    #[test]
    fn test_very_long_note_keeps_off_after_on() {
        let config = BlockConfig::new(44100.0, 256);
        let mut node = MakeNote::with_params(
            config,
            MakeNoteParams {
                duration: 100_000.0,
                ..MakeNoteParams::default()
            },
        );
        run(&mut node, &[5]);

        let out = node.output();
        assert_eq!(out.len(), 2);
        assert_eq!(out.num_in_block(), 1);
        assert!(out[0].is_note_on(0, 63));
        assert_eq!(out[0].frame(), 5);
        assert!(out[1].is_note_off(0, 63));
        assert_eq!(out[1].frame(), i32::MAX);
    }

    #[test]
    fn test_off_velocity_stored_as_given_and_clamped_on_read() {
        let mut node = MakeNote::new(config());
        let handle = node.handle();
        handle.set_off_velocity(300);
        assert_eq!(handle.off_velocity(), 300);

        run(&mut node, &[0]);
        assert_eq!(node.output()[1].bytes(), &[0x80, 63, 127]);
    }
}
