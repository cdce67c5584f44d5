//! Test helpers and fixtures for legato integration tests
//!
//! Most tests drive buffers block by block the way a host graph would: advance first,
//! push, then read the due prefix.

#![allow(dead_code)]

use legato::prelude::*;

/// Install a subscriber so `tracing` output shows up with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Control change whose two data bytes encode `seq`, so tests can track packet identity.
pub fn tagged(frame: i32, seq: u16) -> MidiPacket {
    MidiPacket::new(frame, &[0xB0, (seq >> 7) as u8 & 0x7F, seq as u8 & 0x7F])
}

pub fn tag_of(packet: &MidiPacket) -> u16 {
    ((packet.bytes()[1] as u16) << 7) | packet.bytes()[2] as u16
}

pub fn frames(buffer: &MidiBuffer) -> Vec<i32> {
    buffer.packets().iter().map(MidiPacket::frame).collect()
}

/// Assert the ordering and due-prefix invariants of a buffer.
pub fn assert_buffer_invariants(buffer: &MidiBuffer) {
    let packets = buffer.packets();
    for pair in packets.windows(2) {
        assert!(
            pair[0].frame() <= pair[1].frame(),
            "packets out of order: {} before {}",
            pair[0].frame(),
            pair[1].frame()
        );
    }

    let fpb = buffer.frames_per_block();
    let due = packets.iter().filter(|p| p.frame() < fpb).count();
    assert_eq!(buffer.num_in_block(), due, "due count mismatch");
    assert!(buffer.in_block().iter().all(|p| p.frame() < fpb));
    assert!(packets[due..].iter().all(|p| p.frame() >= fpb));
}

/// Read this block's due packets with frames made absolute.
pub fn collect_due(buffer: &MidiBuffer, block: usize, out: &mut Vec<(i64, MidiPacket)>) {
    let base = block as i64 * buffer.frames_per_block() as i64;
    for i in 0..buffer.num_in_block() {
        out.push((base + buffer[i].frame() as i64, buffer[i]));
    }
}
