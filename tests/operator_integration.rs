//! Operator chain integration tests (requires the "nodes" feature)
//!
//! Drives make-note and merge operators block by block through the engine, the way a
//! host graph schedules them: triggers first, then generators, then merges.
//!
//! Run with:
//! ```bash
//! cargo test -p legato --test operator_integration
//! ```

#![cfg(feature = "nodes")]

mod helpers;

use helpers::{assert_buffer_invariants, collect_due, init_tracing};
use legato::prelude::*;

/// 2^-8 s at 8 kHz: exactly 31.25 frames, rounded up to 32.
const NOTE_SECONDS: f64 = 0.00390625;
const NOTE_FRAMES: i64 = 32;

fn engine() -> LegatoEngine {
    init_tracing();
    LegatoEngine::builder()
        .sample_rate(8000.0)
        .block_size(16)
        .build()
        .expect("Failed to create test engine")
}

/// Absolute (frame, status, note) of everything a buffer delivered.
fn events(delivered: &[(i64, MidiPacket)]) -> Vec<(i64, u8, u8)> {
    delivered
        .iter()
        .map(|(frame, p)| (*frame, p.status(), p.bytes()[1]))
        .collect()
}

#[test]
fn test_make_note_into_merge_across_blocks() {
    let engine = engine();
    let mut lead = engine
        .create_node("make_note", &params! { "note" => 60, "duration" => NOTE_SECONDS })
        .unwrap();
    let mut bass = engine
        .create_node("make_note", &params! { "note" => 36, "duration" => NOTE_SECONDS })
        .unwrap();
    let mut merge = engine.create_node("midi_merge", &params! { "inputs" => 2 }).unwrap();

    let mut lead_triggers = engine.trigger_buffer();
    let mut bass_triggers = engine.trigger_buffer();
    let mut delivered = Vec::new();

    for block in 0..6 {
        lead_triggers.advance_block();
        bass_triggers.advance_block();
        match block {
            0 => lead_triggers.trigger(4),
            1 => bass_triggers.trigger(2),
            _ => {}
        }

        lead.execute(&BlockInputs::empty().with_triggers(lead_triggers.as_slice()));
        bass.execute(&BlockInputs::empty().with_triggers(bass_triggers.as_slice()));

        let inputs = [lead.output(), bass.output()];
        merge.execute(&BlockInputs::empty().with_midi(&inputs));

        assert_buffer_invariants(merge.output());
        collect_due(merge.output(), block, &mut delivered);
    }

    assert_eq!(
        events(&delivered),
        vec![
            (4, 0x90, 60),
            (18, 0x90, 36),
            (4 + NOTE_FRAMES, 0x80, 60),
            (18 + NOTE_FRAMES, 0x80, 36),
        ]
    );
}

#[test]
fn test_retrigger_across_block_moves_pending_off() {
    let engine = engine();
    let mut node = engine.make_note(MakeNoteParams {
        duration: NOTE_SECONDS,
        ..MakeNoteParams::default()
    });
    let mut triggers = engine.trigger_buffer();
    let mut delivered = Vec::new();

    for block in 0..5 {
        triggers.advance_block();
        match block {
            0 => triggers.trigger(0),
            // still sounding: the first note's off (abs 32) moves to abs 20
            1 => triggers.trigger(4),
            _ => {}
        }
        node.execute(&BlockInputs::empty().with_triggers(triggers.as_slice()));
        assert_buffer_invariants(node.output());
        collect_due(node.output(), block, &mut delivered);
    }

    assert_eq!(
        events(&delivered),
        vec![
            (0, 0x90, 63),
            (20, 0x80, 63),
            (20, 0x90, 63),
            (20 + NOTE_FRAMES, 0x80, 63),
        ]
    );
}

#[test]
fn test_shortened_note_ends_at_pending_on() {
    let engine = engine();
    let mut buffer = engine.midi_buffer();

    buffer.advance_block();
    buffer.push_note(40, 100, 0, 60, 100, 0);
    // starts earlier and would overlap the note at 40: it is cut there instead
    buffer.push_note(10, 100, 0, 60, 90, 0);

    let mut delivered = Vec::new();
    for block in 0..10 {
        if block > 0 {
            buffer.advance_block();
        }
        collect_due(&buffer, block, &mut delivered);
    }

    assert_eq!(
        events(&delivered),
        vec![
            (10, 0x90, 60),
            (40, 0x80, 60),
            (40, 0x90, 60),
            (140, 0x80, 60),
        ]
    );
}

#[test]
fn test_handle_changes_apply_next_trigger() {
    let engine = engine();
    let mut node = engine.make_note(MakeNoteParams::default());
    let handle = node.handle();

    node.execute(&BlockInputs::empty().with_triggers(&[0]));
    assert!(node.output()[0].is_note_on(0, 63));

    handle.set_note(72);
    handle.set_channel(3);
    handle.set_duration(NOTE_SECONDS);

    node.reset();
    node.execute(&BlockInputs::empty().with_triggers(&[1]));
    let out = node.output();
    assert_eq!(out.len(), 2);
    assert!(out[0].is_note_on(3, 72));
    assert!(out[1].is_note_off(3, 72));
    assert_eq!(out[1].frame(), 1 + NOTE_FRAMES as i32);
}

#[test]
fn test_merge_output_feeds_another_merge() {
    let engine = engine();
    let mut a = engine.midi_buffer();
    let mut b = engine.midi_buffer();
    let mut c = engine.midi_buffer();
    a.push(MidiPacket::note_on(3, 60, 100, 0));
    b.push(MidiPacket::note_on(1, 62, 100, 0));
    c.push(MidiPacket::new(3, &[0xB0, 64, 127]));

    let mut first = engine.midi_merge(2);
    let mut second = engine.midi_merge(2);

    first.execute(&BlockInputs::empty().with_midi(&[&a, &b]));
    second.execute(&BlockInputs::empty().with_midi(&[first.output(), &c]));

    let out = second.output();
    assert_eq!(out.num_in_block(), 3);
    assert!(out[0].is_note_on(0, 62));
    assert!(out[1].is_note_on(0, 60));
    assert_eq!(out[2].bytes(), &[0xB0, 64, 127]);
}
