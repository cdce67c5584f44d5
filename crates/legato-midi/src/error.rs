//! Error types for MIDI message conversion.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Message is {0} bytes, packets hold at most 3")]
    NotShortMessage(usize),

    #[error("MIDI parse error: {0}")]
    Parse(String),
}

impl From<midi_msg::ParseError> for Error {
    fn from(e: midi_msg::ParseError) -> Self {
        Error::Parse(format!("{e:?}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
