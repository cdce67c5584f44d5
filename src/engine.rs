//! LegatoEngine: the context object every operator is created from.

use crate::core::{
    BlockConfig, MidiBuffer, MidiOperator, NodeParams, NodeRegistry, TriggerBuffer,
};
use crate::Result;

#[cfg(feature = "nodes")]
use crate::nodes::{MakeNote, MakeNoteParams, MidiMerge};

/// Owns the validated block configuration and the node registry.
///
/// There is no process-wide state: two engines with different block sizes can live side
/// by side, and each hands out buffers and operators sized for its own blocks.
///
/// # Example
///
/// ```ignore
/// use legato::prelude::*;
///
/// let engine = LegatoEngine::builder().sample_rate(48000.0).block_size(64).build()?;
///
/// let mut note = engine.create_node("make_note", &params! { "note" => 60 })?;
/// let mut triggers = engine.trigger_buffer();
///
/// // every block
/// triggers.advance_block();
/// triggers.trigger(12);
/// note.execute(&BlockInputs::empty().with_triggers(triggers.as_slice()));
/// for packet in note.output().in_block() {
///     // hand off to the sink
/// }
/// ```
#[derive(Debug, Clone)]
pub struct LegatoEngine {
    config: BlockConfig,
    registry: NodeRegistry,
}

impl LegatoEngine {
    /// Create a new engine builder
    pub fn builder() -> crate::LegatoEngineBuilder {
        crate::LegatoEngineBuilder::default()
    }

    pub(crate) fn from_parts(config: BlockConfig, registry: NodeRegistry) -> Self {
        Self { config, registry }
    }

    #[inline]
    pub fn config(&self) -> &BlockConfig {
        &self.config
    }

    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.config.sample_rate
    }

    #[inline]
    pub fn frames_per_block(&self) -> usize {
        self.config.frames_per_block
    }

    /// Registry used by [`create_node`](Self::create_node). Register custom operators here.
    #[inline]
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Create a registered operator by name.
    pub fn create_node(&self, name: &str, params: &NodeParams) -> Result<Box<dyn MidiOperator>> {
        Ok(self.registry.create(name, params)?)
    }

    /// Empty MIDI buffer sized for this engine's blocks.
    pub fn midi_buffer(&self) -> MidiBuffer {
        self.config.midi_buffer()
    }

    pub fn trigger_buffer(&self) -> TriggerBuffer {
        self.config.trigger_buffer()
    }

    /// Typed make-note operator, for callers that want its control handle.
    #[cfg(feature = "nodes")]
    pub fn make_note(&self, params: MakeNoteParams) -> MakeNote {
        MakeNote::with_params(self.config, params)
    }

    /// Typed MIDI merge operator with `inputs` inputs (clamped to 2-8).
    #[cfg(feature = "nodes")]
    pub fn midi_merge(&self, inputs: usize) -> MidiMerge {
        MidiMerge::new(inputs, self.midi_buffer())
    }
}
