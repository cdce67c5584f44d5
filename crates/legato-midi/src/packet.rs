//! Short MIDI message with a block-relative frame offset.

use serde::{Deserialize, Serialize};

/// Maximum number of bytes a packet can hold (note on/off, CC, pitch bend, ...).
pub const MAX_PACKET_LEN: usize = 3;

const NOTE_OFF: u8 = 0x80;
const NOTE_ON: u8 = 0x90;

/// RT-safe short MIDI message scheduled at a frame offset.
///
/// The frame is relative to the start of the block currently being processed and
/// may exceed the block length for lookahead scheduling. Bytes past [`len`](Self::len)
/// are always zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MidiPacket {
    frame: i32,
    data: [u8; MAX_PACKET_LEN],
    len: u8,
}

impl MidiPacket {
    /// Build a packet from raw bytes.
    ///
    /// Anything past [`MAX_PACKET_LEN`] bytes is dropped.
    #[inline]
    pub fn new(frame: i32, bytes: &[u8]) -> Self {
        let len = bytes.len().min(MAX_PACKET_LEN);
        let mut data = [0u8; MAX_PACKET_LEN];
        data[..len].copy_from_slice(&bytes[..len]);
        Self {
            frame,
            data,
            len: len as u8,
        }
    }

    /// Note-on message. Values are expected to be in range already; only the
    /// channel is masked to its low nibble.
    #[inline]
    pub fn note_on(frame: i32, note: u8, velocity: u8, channel: u8) -> Self {
        Self::new(frame, &[NOTE_ON | (channel & 0x0F), note, velocity])
    }

    /// Note-off message. Same range contract as [`note_on`](Self::note_on).
    #[inline]
    pub fn note_off(frame: i32, note: u8, velocity: u8, channel: u8) -> Self {
        Self::new(frame, &[NOTE_OFF | (channel & 0x0F), note, velocity])
    }

    #[inline]
    pub fn frame(&self) -> i32 {
        self.frame
    }

    #[inline]
    pub fn data(&self) -> &[u8; MAX_PACKET_LEN] {
        &self.data
    }

    /// Number of valid bytes in [`data`](Self::data).
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The valid bytes only.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.data[..self.len()]
    }

    /// Status nibble (upper 4 bits of the first byte).
    #[inline]
    pub fn status(&self) -> u8 {
        self.data[0] & 0xF0
    }

    #[inline]
    pub fn channel(&self) -> u8 {
        self.data[0] & 0x0F
    }

    /// Shift the frame back by `frames`. Only meaningful during block rollover.
    #[inline]
    pub fn advance(&mut self, frames: i32) {
        self.frame -= frames;
    }

    #[inline]
    pub fn is_note_on(&self, channel: u8, note: u8) -> bool {
        self.len() == 3 && self.data[0] == (NOTE_ON | (channel & 0x0F)) && self.data[1] == note
    }

    #[inline]
    pub fn is_note_off(&self, channel: u8, note: u8) -> bool {
        self.len() == 3 && self.data[0] == (NOTE_OFF | (channel & 0x0F)) && self.data[1] == note
    }

    /// Copy of this packet rescheduled at `frame`.
    #[inline]
    pub fn with_frame(&self, frame: i32) -> Self {
        Self { frame, ..*self }
    }
}
