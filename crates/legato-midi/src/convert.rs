//! Translation between packets and `midi-msg` messages.
//!
//! Consumers use this when handing due packets to a sink that speaks a structured MIDI
//! model instead of raw bytes.

use midi_msg::MidiMsg;

use crate::error::{Error, Result};
use crate::packet::{MidiPacket, MAX_PACKET_LEN};

impl MidiPacket {
    /// Parse the valid bytes into a structured message.
    pub fn to_midi_msg(&self) -> Result<MidiMsg> {
        if self.is_empty() {
            return Err(Error::Parse("empty packet".into()));
        }
        let (msg, _len) = MidiMsg::from_midi(self.bytes())?;
        Ok(msg)
    }

    /// Encode a structured message at `frame`.
    ///
    /// Unlike [`MidiPacket::new`], this refuses messages that do not fit instead of
    /// truncating them.
    pub fn from_midi_msg(frame: i32, msg: &MidiMsg) -> Result<Self> {
        let bytes = msg.to_midi();
        if bytes.is_empty() || bytes.len() > MAX_PACKET_LEN {
            return Err(Error::NotShortMessage(bytes.len()));
        }
        Ok(Self::new(frame, &bytes))
    }
}
