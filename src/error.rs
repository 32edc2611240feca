//! Error types for the screen composition engine.

use crate::types::Slug;
use thiserror::Error;

/// Errors raised during a build pass
///
/// All variants are fatal for the current pass. Expected "no output" outcomes
/// (hidden subtrees, resolver-suppressed fragments) are not errors and are
/// reported through `BuildOutcome` instead.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A deferred child descriptor has no registered factory. This indicates
    /// a malformed tree declaration, not a runtime condition.
    #[error("Unknown child descriptor: {0}")]
    UnknownDescriptor(String),

    #[error("Visibility check failed for {slug}: {reason}")]
    Visibility { slug: Slug, reason: String },

    #[error("Template compilation failed for {template}: {reason}")]
    Template { template: String, reason: String },

    #[error("Fragment resolution failed for {fragment}: {reason}")]
    Fragment { fragment: String, reason: String },
}

/// Errors raised by screen-level operations
#[derive(Debug, Error)]
pub enum ScreenError {
    /// No element in the screen's trees has the requested slug. The transport
    /// layer maps this to a client-visible not-found response.
    #[error("No layer found for slug: {0}")]
    SlugNotFound(Slug),

    /// The partial-rebuild target exists but produced no output this pass.
    #[error("Layer {0} produced no output")]
    Suppressed(Slug),

    #[error("Build failed: {0}")]
    Build(#[from] BuildError),
}
