//! Dais: Recursive Screen Composition
//!
//! A declarative screen-building core for admin panels: trees of composite
//! layers and fragment leaves that render against a shared context, prune
//! hidden subtrees, and carry deterministic content-derived slugs so a client
//! can request a rebuild of exactly one subtree.

pub mod context;
pub mod element;
pub mod error;
pub mod pass;
pub mod render;
pub mod screen;
pub mod types;
pub mod visibility;
