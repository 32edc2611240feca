//! Build context
//!
//! A read-mostly key/value bag constructed once per build pass and shared by
//! reference across every element visited in that pass. The tree never mutates
//! the context it was given; elements merge it with local overrides into a new
//! transient map for their own render step.

use crate::types::{Value, VarMap};
use serde::{Deserialize, Serialize};

/// Shared data bag for one build pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    entries: VarMap,
}

impl Context {
    /// Create an empty context
    pub fn new() -> Self {
        Context::default()
    }

    /// Builder-style insert, used while assembling the context for a pass
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Get a value by key, falling back to the given default
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.entries.get(key).unwrap_or(default)
    }

    /// Snapshot the context into an owned map
    ///
    /// Elements use this when they need to merge local overrides without
    /// touching the shared context.
    pub fn snapshot(&self) -> VarMap {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for Context {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Context {
            entries: iter.into_iter().collect(),
        }
    }
}
