//! Rendering collaborators
//!
//! The core treats template compilation and fragment resolution as opaque,
//! synchronous services behind these seams. A template engine must be
//! deterministic for identical inputs so that callers caching on slug see
//! stable output.

pub mod memory;

pub use memory::{FragmentDef, MemoryFragments, MemoryTemplates};

use crate::error::BuildError;
use crate::types::VarMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rendered output of an element or template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markup(String);

impl Markup {
    pub fn new(s: impl Into<String>) -> Self {
        Markup(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Markup {
    fn from(s: &str) -> Self {
        Markup(s.to_string())
    }
}

impl From<String> for Markup {
    fn from(s: String) -> Self {
        Markup(s)
    }
}

/// Template compilation service
///
/// `compile` must be deterministic given identical inputs.
pub trait TemplateEngine: Send + Sync {
    fn compile(&self, template: &str, vars: &VarMap) -> Result<Markup, BuildError>;
}

/// What a resolved fragment renders through
///
/// `Named` is a reference to a view that needs one further compilation step;
/// `Inline` is finished markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    Inline(Markup),
    Named(String),
}

/// A fragment after resolution
///
/// Exposes the resolver's own suppression decision, the render target, and any
/// data the fragment wants to contribute to the final render step.
pub trait ResolvedFragment {
    /// Independent suppression gate, checked after visibility
    fn should_render(&self) -> bool;

    fn render_target(&self) -> RenderTarget;

    /// Data merged into the render target's context; supplements the fragment's
    /// own data, never overrides it
    fn exposed_data(&self) -> VarMap;
}

impl fmt::Debug for dyn ResolvedFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedFragment")
            .field("should_render", &self.should_render())
            .field("render_target", &self.render_target())
            .finish()
    }
}

/// Fragment resolution service
pub trait FragmentResolver: Send + Sync {
    fn resolve(&self, name: &str, data: &VarMap) -> Result<Box<dyn ResolvedFragment>, BuildError>;
}
