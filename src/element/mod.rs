//! Tree elements
//!
//! The composition tree is built from elements behind one polymorphic `build`
//! contract: composite layers recurse into named slots, fragment leaves
//! delegate to an externally resolved UI fragment. Every element carries a
//! deterministic content-derived slug so a client can address exactly one
//! subtree for a partial rebuild.

pub mod fragment;
pub mod identity;
pub mod layer;
pub mod search;

pub use fragment::Fragment;
pub use identity::{Canonical, ChildId};
pub use layer::Layer;
pub use search::{find_by_slug, find_by_type};

use crate::context::Context;
use crate::error::BuildError;
use crate::pass::BuildPass;
use crate::render::Markup;
use crate::types::Slug;
use crate::visibility::Gate;
use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a tree element
pub type ElementRef = Arc<dyn Element>;

/// Named, insertion-ordered child lists of a composite element
///
/// Slot iteration order is declaration order and is preserved through
/// visibility filtering.
pub type Slots = IndexMap<String, Vec<ChildRef>>;

/// Outcome of building one element in one pass
///
/// Transitions are evaluated top-down and are monotonic: a `Hidden` parent
/// never visits its descendants; a child's own suppression does not affect
/// its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The element rendered output
    Rendered(Markup),
    /// The element's visibility gate evaluated false
    Hidden,
    /// A fragment's resolver declined to render
    Suppressed,
}

impl BuildOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, BuildOutcome::Rendered(_))
    }

    /// Rendered markup, or `None` for either suppression state
    pub fn markup(self) -> Option<Markup> {
        match self {
            BuildOutcome::Rendered(markup) => Some(markup),
            BuildOutcome::Hidden | BuildOutcome::Suppressed => None,
        }
    }
}

/// Reference to a child element within a slot
///
/// A child is either an already-constructed element or a deferred descriptor
/// instantiated through the pass registry on first visit. Deferred resolution
/// is memoized per build pass only, never on the tree itself.
#[derive(Clone)]
pub enum ChildRef {
    Instance(ElementRef),
    Deferred(String),
}

impl ChildRef {
    pub fn instance(element: impl Element) -> Self {
        ChildRef::Instance(Arc::new(element))
    }

    pub fn deferred(descriptor: impl Into<String>) -> Self {
        ChildRef::Deferred(descriptor.into())
    }
}

impl fmt::Debug for ChildRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildRef::Instance(element) => {
                f.debug_tuple("Instance").field(&element.slug()).finish()
            }
            ChildRef::Deferred(descriptor) => {
                f.debug_tuple("Deferred").field(descriptor).finish()
            }
        }
    }
}

impl fmt::Debug for dyn Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element").field("slug", &self.slug()).finish()
    }
}

impl<E: Element> From<E> for ChildRef {
    fn from(element: E) -> Self {
        ChildRef::instance(element)
    }
}

/// A composition tree element
///
/// `build` is the uniform single-level entry point used for both full-tree
/// and partial rebuilds: layers implement it by recursing into their slots,
/// fragments as a terminal rendering step.
pub trait Element: Send + Sync + 'static {
    /// Canonical description of the element's declarative state
    ///
    /// Excludes gates, contexts, and any cached render output; see
    /// [`identity`].
    fn canonical(&self) -> Canonical;

    /// The element's visibility gate
    fn gate(&self) -> &Gate;

    /// Named child slots; empty for leaves
    fn slots(&self) -> &Slots;

    /// Build this element against the current pass
    fn build(&self, pass: &BuildPass<'_>) -> Result<BuildOutcome, BuildError>;

    /// Downcast support for type search
    fn as_any(&self) -> &dyn Any;

    /// Content-derived address of this element
    ///
    /// Identical declarative configuration always yields the same slug,
    /// independent of process, time, or context.
    fn slug(&self) -> Slug {
        identity::compute_slug(&self.canonical())
    }

    /// Evaluate the visibility gate, mapping predicate failure to a
    /// build-pass failure
    fn is_visible(&self, ctx: &Context) -> Result<bool, BuildError> {
        self.gate().check(ctx).map_err(|e| BuildError::Visibility {
            slug: self.slug(),
            reason: e.to_string(),
        })
    }
}
