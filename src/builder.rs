//! Builder for configuring and constructing a `LegatoEngine`.

use crate::core::{BlockConfig, NodeRegistry};
use crate::{LegatoEngine, Result};

/// Built-in operators are registered automatically when the `nodes` feature is enabled.
///
/// # Example
///
/// ```
/// use legato::prelude::*;
///
/// let engine = LegatoEngine::builder()
///     .sample_rate(48000.0)
///     .block_size(128)
///     .build()?;
///
/// assert_eq!(engine.frames_per_block(), 128);
/// # Ok::<(), legato::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LegatoEngineBuilder {
    config: BlockConfig,
}

impl LegatoEngineBuilder {
    /// Default: 44100 Hz
    pub fn sample_rate(mut self, sample_rate: f64) -> Self {
        self.config.sample_rate = sample_rate;
        self
    }

    /// Frames per processing block. Default: 256
    pub fn block_size(mut self, frames: usize) -> Self {
        self.config.frames_per_block = frames;
        self
    }

    /// Replace the whole configuration, e.g. one deserialized from a host settings file.
    pub fn config(mut self, config: BlockConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<LegatoEngine> {
        self.config.validate()?;

        let registry = NodeRegistry::new(self.config);

        #[cfg(feature = "nodes")]
        legato_nodes::register_builtin_nodes(&registry);

        tracing::info!(
            "Legato engine ready: {} Hz, {} frames per block, {} node types",
            self.config.sample_rate,
            self.config.frames_per_block,
            registry.list_types().len()
        );

        Ok(LegatoEngine::from_parts(self.config, registry))
    }
}
