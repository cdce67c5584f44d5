//! Frame-accurate MIDI types for block-based audio graphs.
//!
//! - [`MidiPacket`]: a short (1-3 byte) MIDI message with a block-relative frame offset
//! - [`MidiBuffer`]: the per-block ordered event queue, with note-collision handling in
//!   [`MidiBuffer::push_note`] and frame rebasing in [`MidiBuffer::advance_block`]
//!
//! # Example
//!
//! ```
//! use legato_midi::{MidiBuffer, MidiPacket};
//!
//! let mut buffer = MidiBuffer::new(16);
//! buffer.advance_block();
//! buffer.push_note(4, 20, 0, 60, 100, 0);
//! buffer.push(MidiPacket::new(2, &[0xB0, 7, 90]));
//!
//! assert_eq!(buffer.num_in_block(), 2);
//! assert_eq!(buffer[0].frame(), 2);
//!
//! buffer.advance_block();
//! assert_eq!(buffer.num_in_block(), 1);
//! assert!(buffer[0].is_note_off(0, 60));
//! assert_eq!(buffer[0].frame(), 8);
//! ```

pub mod error;
pub use error::{Error, Result};

mod buffer;
mod convert;
mod packet;

pub use buffer::MidiBuffer;
pub use packet::{MidiPacket, MAX_PACKET_LEN};

// Re-export the message model so consumers don't need to import midi-msg directly
pub use midi_msg::{Channel, ChannelVoiceMsg, ControlChange, MidiMsg};
