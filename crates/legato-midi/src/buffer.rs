//! Per-block MIDI event queue with frame-accurate scheduling.
//!
//! Producers call [`MidiBuffer::advance_block`] once at the start of every block and then
//! push events with frames relative to that block's start. Frames may run past the block
//! length; those packets stay queued and are rebased on the next advance. Consumers read
//! the first [`MidiBuffer::num_in_block`] packets, which are the ones due in this block.
//!
//! ```text
//!  block n                 block n+1
//! |0 ............ fpb-1|fpb ............ 2*fpb-1|
//!   due (prefix)          pending, rebased by -fpb on advance
//! ```

use core::ops::Index;

use crate::packet::MidiPacket;

/// Default number of packets reserved up front.
const DEFAULT_CAPACITY: usize = 128;

/// Ordered MIDI event queue for the current and upcoming blocks.
///
/// Packets are sorted by frame; packets sharing a frame keep insertion order.
/// The packets with `frame < frames_per_block` always form the leading prefix.
///
/// # RT Safety
///
/// Single writer, single reader per block. No locking and no allocation beyond
/// amortized growth of the backing `Vec` (pre-reserve with [`with_capacity`](Self::with_capacity)).
#[derive(Debug, Clone)]
pub struct MidiBuffer {
    frames_per_block: i32,
    count_in_block: usize,
    last_frame: i32,
    packets: Vec<MidiPacket>,
}

impl MidiBuffer {
    pub fn new(frames_per_block: i32) -> Self {
        Self::with_capacity(frames_per_block, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(frames_per_block: i32, capacity: usize) -> Self {
        debug_assert!(frames_per_block > 0, "frames_per_block must be positive");
        Self {
            frames_per_block,
            count_in_block: 0,
            last_frame: -1,
            packets: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn frames_per_block(&self) -> i32 {
        self.frames_per_block
    }

    /// Roll the buffer forward by one block.
    ///
    /// Drops the packets that were due in the block just finished and rebases the rest
    /// so their frames are relative to the new block start.
    pub fn advance_block(&mut self) {
        debug_assert!(self.count_in_block <= self.packets.len());
        self.packets.drain(..self.count_in_block);
        self.count_in_block = 0;
        self.last_frame = -1;

        for packet in self.packets.iter_mut() {
            packet.advance(self.frames_per_block);
            if packet.frame() < self.frames_per_block {
                self.count_in_block += 1;
            }
            self.last_frame = packet.frame();
        }
    }

    /// Number of packets due in the current block.
    #[inline]
    pub fn num_in_block(&self) -> usize {
        self.count_in_block
    }

    /// The packets due in the current block, in frame order.
    #[inline]
    pub fn in_block(&self) -> &[MidiPacket] {
        &self.packets[..self.count_in_block]
    }

    /// Every queued packet, including those scheduled past this block.
    #[inline]
    pub fn packets(&self) -> &[MidiPacket] {
        &self.packets
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&MidiPacket> {
        self.packets.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.packets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// Insert a packet, keeping frame order.
    pub fn push(&mut self, packet: MidiPacket) {
        let frame = packet.frame();
        if frame < self.frames_per_block {
            self.count_in_block += 1;
        }

        if frame >= self.last_frame {
            self.last_frame = frame;
            self.packets.push(packet);
            return;
        }

        // frame < last_frame, so some packet has a strictly greater frame.
        // Equal frames are skipped so the new packet lands after them.
        match self.packets.iter().position(|p| p.frame() > frame) {
            Some(index) => self.packets.insert(index, packet),
            None => {
                debug_assert!(false, "no insertion point for frame {frame}");
                self.last_frame = frame;
                self.packets.push(packet);
            }
        }
    }

    /// Schedule a note-on at `start` and its note-off at `start + duration`.
    ///
    /// An already scheduled note on the same channel and key is cut so the two never
    /// sound at once:
    ///
    /// 1. A pending note-on inside `[start, end)` ends this note early: a note-off is
    ///    inserted right before it and only our note-on is pushed.
    /// 2. A pending note-off after `start` (our note starts inside another note, or spans
    ///    its end) is moved to `start`, right before our note-on.
    ///
    /// `duration` must be at least one frame. An end past `i32::MAX` is held at `i32::MAX`.
    pub fn push_note(
        &mut self,
        start: i32,
        duration: i32,
        channel: u8,
        note: u8,
        on_velocity: u8,
        off_velocity: u8,
    ) {
        debug_assert!(duration > 0, "note duration must be at least one frame");
        let end = start.saturating_add(duration);

        for index in 0..self.packets.len() {
            let packet = self.packets[index];
            let frame = packet.frame();
            if frame < start {
                continue;
            }

            if packet.is_note_on(channel, note) {
                if frame >= end {
                    break;
                }
                self.packets.insert(
                    index,
                    MidiPacket::note_off(frame, note, off_velocity, channel),
                );
                if frame < self.frames_per_block {
                    self.count_in_block += 1;
                }
                // The off inserted above ends our note; nothing is scheduled at `end`.
                self.push(MidiPacket::note_on(start, note, on_velocity, channel));
                return;
            }

            if packet.is_note_off(channel, note) && frame > start {
                let moved = packet.with_frame(start);
                self.packets.remove(index);
                if frame < self.frames_per_block {
                    // Counted again by the push below.
                    self.count_in_block -= 1;
                }
                self.last_frame = self.packets.last().map_or(-1, MidiPacket::frame);
                self.push(moved);
                break;
            }
        }

        self.push(MidiPacket::note_on(start, note, on_velocity, channel));
        self.push(MidiPacket::note_off(end, note, off_velocity, channel));
    }

    /// Drop every queued packet (transport or stream reset).
    pub fn reset(&mut self) {
        self.packets.clear();
        self.count_in_block = 0;
        self.last_frame = -1;
    }
}

impl Index<usize> for MidiBuffer {
    type Output = MidiPacket;

    #[inline]
    fn index(&self, index: usize) -> &MidiPacket {
        debug_assert!(index < self.packets.len(), "packet index {index} out of range");
        &self.packets[index]
    }
}
