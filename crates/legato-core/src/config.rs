//! Block processing configuration.

use legato_midi::MidiBuffer;
use serde::{Deserialize, Serialize};

use crate::trigger::TriggerBuffer;
use crate::{Error, Result};

/// Largest block the host may hand us.
pub const MAX_FRAMES_PER_BLOCK: usize = 8192;

/// Sample rate and block size shared by every operator in a graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockConfig {
    pub sample_rate: f64,
    pub frames_per_block: usize,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100.0,
            frames_per_block: 256,
        }
    }
}

impl BlockConfig {
    pub fn new(sample_rate: f64, frames_per_block: usize) -> Self {
        Self {
            sample_rate,
            frames_per_block,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(8000.0..=384000.0).contains(&self.sample_rate) {
            return Err(Error::InvalidSampleRate(self.sample_rate));
        }
        if self.frames_per_block == 0 || self.frames_per_block > MAX_FRAMES_PER_BLOCK {
            return Err(Error::InvalidBlockSize(self.frames_per_block));
        }
        Ok(())
    }

    /// Block size as a signed frame count, the unit packets are scheduled in.
    #[inline]
    pub fn frames_per_block_i32(&self) -> i32 {
        // validate() bounds this well below i32::MAX
        self.frames_per_block as i32
    }

    /// Convert a duration in seconds to whole frames, rounding up, never less than one.
    #[inline]
    pub fn duration_to_frames(&self, seconds: f64) -> i32 {
        let frames = (self.sample_rate * seconds).ceil();
        if frames.is_nan() || frames < 1.0 {
            1
        } else if frames >= i32::MAX as f64 {
            i32::MAX
        } else {
            frames as i32
        }
    }

    /// Block duration in seconds.
    #[inline]
    pub fn block_duration(&self) -> f64 {
        self.frames_per_block as f64 / self.sample_rate
    }

    pub fn midi_buffer(&self) -> MidiBuffer {
        MidiBuffer::new(self.frames_per_block_i32())
    }

    pub fn trigger_buffer(&self) -> TriggerBuffer {
        TriggerBuffer::new(self.frames_per_block_i32())
    }
}
