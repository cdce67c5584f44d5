//! Node registry for creating MIDI operators by name.
//!
//! The registry is an explicit context object: the engine owns one, and every
//! constructor receives the engine's [`BlockConfig`] instead of reading process-wide state.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::BlockConfig;
use crate::error::NodeRegistryError;
use crate::operator::MidiOperator;

/// Create a `NodeParams` HashMap with key-value pairs.
///
/// # Example
/// ```
/// let params = legato_core::params! {
///     "note" => 60,
///     "duration" => 0.25,
/// };
/// assert_eq!(params.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut map = $crate::NodeParams::new();
        $(
            map.insert($key.to_string(), $value.into());
        )*
        map
    }};
}

/// Function that constructs an operator from the block config and parameters.
pub type NodeConstructor = Arc<
    dyn Fn(&BlockConfig, &NodeParams) -> Result<Box<dyn MidiOperator>, NodeRegistryError>
        + Send
        + Sync,
>;

/// Node parameters (simple key-value map)
pub type NodeParams = HashMap<String, NodeParamValue>;

/// Parameter value types
#[derive(Debug, Clone, PartialEq)]
pub enum NodeParamValue {
    Float(f64),
    Int(i64),
}

impl NodeParamValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) if f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    /// Integer value saturated into `i32`.
    pub fn as_i32(&self) -> Option<i32> {
        self.as_i64()
            .map(|i| i.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
    }
}

impl From<f64> for NodeParamValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<f32> for NodeParamValue {
    fn from(f: f32) -> Self {
        Self::Float(f as f64)
    }
}

impl From<i64> for NodeParamValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for NodeParamValue {
    fn from(i: i32) -> Self {
        Self::Int(i as i64)
    }
}

/// Registry of operator constructors, bound to one block configuration.
///
/// Clones share the same constructor table.
#[derive(Clone)]
pub struct NodeRegistry {
    config: BlockConfig,
    constructors: Arc<RwLock<HashMap<String, NodeConstructor>>>,
}

impl NodeRegistry {
    pub fn new(config: BlockConfig) -> Self {
        Self {
            config,
            constructors: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    #[inline]
    pub fn config(&self) -> &BlockConfig {
        &self.config
    }

    /// Register an operator constructor. Replaces any previous entry with the same name.
    ///
    /// # Example
    /// ```ignore
    /// registry.register("thru", |config, _params| {
    ///     Ok(Box::new(Thru::new(config.midi_buffer())))
    /// });
    /// ```
    pub fn register<F>(&self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&BlockConfig, &NodeParams) -> Result<Box<dyn MidiOperator>, NodeRegistryError>
            + Send
            + Sync
            + 'static,
    {
        let name = name.into();
        tracing::debug!("Registered node type '{}'", name);
        if self
            .constructors
            .write()
            .insert(name.clone(), Arc::new(constructor))
            .is_some()
        {
            tracing::warn!("Node type '{}' was already registered, replaced", name);
        }
    }

    /// Create an operator from its registered name and parameters.
    pub fn create(
        &self,
        name: &str,
        params: &NodeParams,
    ) -> Result<Box<dyn MidiOperator>, NodeRegistryError> {
        // Clone the Arc so the constructor runs without holding the lock.
        let constructor = self
            .constructors
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| NodeRegistryError::UnknownNodeType(name.to_string()))?;

        let node = constructor(&self.config, params)?;
        tracing::debug!("Created node '{}' with {} params", name, params.len());
        Ok(node)
    }

    /// List all registered node types, sorted by name.
    pub fn list_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.constructors.read().keys().cloned().collect();
        types.sort();
        types
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.constructors.read().contains_key(name)
    }

    pub fn unregister(&self, name: &str) -> bool {
        self.constructors.write().remove(name).is_some()
    }

    pub fn clear(&self) {
        self.constructors.write().clear();
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new(BlockConfig::default())
    }
}

impl core::fmt::Debug for NodeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeRegistry")
            .field("config", &self.config)
            .field("types", &self.list_types())
            .finish()
    }
}

/// Helper to get an optional parameter with default.
///
/// A present but unconvertible value is an error rather than silently defaulted.
pub fn get_param_or<T>(
    params: &NodeParams,
    name: &str,
    default: T,
    convert: impl FnOnce(&NodeParamValue) -> Option<T>,
) -> Result<T, NodeRegistryError> {
    match params.get(name) {
        None => Ok(default),
        Some(v) => convert(v).ok_or_else(|| {
            NodeRegistryError::InvalidParameter(name.to_string(), format!("{:?}", v))
        }),
    }
}
