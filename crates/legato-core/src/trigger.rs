//! Sample-accurate trigger input for one block.

use core::ops::Index;

const DEFAULT_CAPACITY: usize = 32;

/// Frames at which a trigger fired during the current block, in ascending order.
#[derive(Debug, Clone)]
pub struct TriggerBuffer {
    frames_per_block: i32,
    frames: Vec<i32>,
}

impl TriggerBuffer {
    pub fn new(frames_per_block: i32) -> Self {
        Self {
            frames_per_block,
            frames: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    #[inline]
    pub fn frames_per_block(&self) -> i32 {
        self.frames_per_block
    }

    /// Clear the previous block's triggers.
    #[inline]
    pub fn advance_block(&mut self) {
        self.frames.clear();
    }

    /// Fire at `frame` within the current block. Frames outside the block are clamped.
    pub fn trigger(&mut self, frame: i32) {
        debug_assert!(
            (0..self.frames_per_block).contains(&frame),
            "trigger frame {frame} outside block"
        );
        let frame = frame.clamp(0, self.frames_per_block - 1);
        let index = self.frames.partition_point(|&f| f <= frame);
        self.frames.insert(index, frame);
    }

    #[inline]
    pub fn num_triggered_in_block(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[i32] {
        &self.frames
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.frames.iter().copied()
    }

    #[inline]
    pub fn reset(&mut self) {
        self.frames.clear();
    }
}

impl Index<usize> for TriggerBuffer {
    type Output = i32;

    #[inline]
    fn index(&self, index: usize) -> &i32 {
        &self.frames[index]
    }
}
