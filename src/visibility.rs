//! Visibility capability
//!
//! Every element composes with an explicit visibility gate evaluated against
//! the current context at each traversal step. Checks are never cached:
//! predicates may reference context values that differ per traversal path, so
//! they are re-evaluated on every visit, even within the same build pass.

use crate::context::Context;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error produced by a failing visibility predicate
///
/// Predicates are expected to be total, side-effect-free functions of the
/// context; a failure propagates as a build-pass failure.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct VisibilityError(pub String);

/// Per-element visibility predicate
pub trait Visibility: Send + Sync {
    fn check(&self, ctx: &Context) -> Result<bool, VisibilityError>;
}

/// Cloneable handle to a visibility predicate
#[derive(Clone)]
pub struct Gate(Arc<dyn Visibility>);

impl Gate {
    /// Gate that always passes; the default for every element
    pub fn always() -> Self {
        Gate(Arc::new(Always))
    }

    /// Gate that never passes
    pub fn hidden() -> Self {
        Gate(Arc::new(Hidden))
    }

    /// Gate from a total predicate over the context
    pub fn when<F>(predicate: F) -> Self
    where
        F: Fn(&Context) -> bool + Send + Sync + 'static,
    {
        Gate(Arc::new(Predicate(predicate)))
    }

    /// Gate from a predicate that may fail; failures abort the build pass
    pub fn fallible<F>(predicate: F) -> Self
    where
        F: Fn(&Context) -> Result<bool, VisibilityError> + Send + Sync + 'static,
    {
        Gate(Arc::new(Fallible(predicate)))
    }

    pub fn check(&self, ctx: &Context) -> Result<bool, VisibilityError> {
        self.0.check(ctx)
    }
}

impl Default for Gate {
    fn default() -> Self {
        Gate::always()
    }
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Gate")
    }
}

struct Always;

impl Visibility for Always {
    fn check(&self, _ctx: &Context) -> Result<bool, VisibilityError> {
        Ok(true)
    }
}

struct Hidden;

impl Visibility for Hidden {
    fn check(&self, _ctx: &Context) -> Result<bool, VisibilityError> {
        Ok(false)
    }
}

struct Predicate<F>(F);

impl<F> Visibility for Predicate<F>
where
    F: Fn(&Context) -> bool + Send + Sync,
{
    fn check(&self, ctx: &Context) -> Result<bool, VisibilityError> {
        Ok((self.0)(ctx))
    }
}

struct Fallible<F>(F);

impl<F> Visibility for Fallible<F>
where
    F: Fn(&Context) -> Result<bool, VisibilityError> + Send + Sync,
{
    fn check(&self, ctx: &Context) -> Result<bool, VisibilityError> {
        (self.0)(ctx)
    }
}
