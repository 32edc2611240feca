//! Slug computation for tree elements using BLAKE3
//!
//! A slug is a structural fingerprint over an element's canonical declarative
//! fields: kind, template id, ordered slot-to-child-identity mapping, and the
//! sorted variable map. Transient state (gates, contexts, cached output) is
//! explicitly excluded, so two structurally identical configurations hash
//! identically no matter which context they are later built with.

use crate::element::{ChildRef, Slots};
use crate::types::{Slug, VarMap};
use blake3::Hasher;
use serde::Serialize;

/// Child entry in a canonical description
///
/// An instantiated child contributes its own slug; a deferred child
/// contributes its descriptor key. Both are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "ref", content = "value", rename_all = "snake_case")]
pub enum ChildId {
    Slug(Slug),
    Deferred(String),
}

/// Canonical, deterministic description of an element's declarative state
///
/// Serializable so the surrounding application can expose a client-visible
/// description of a node alongside its slug.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Canonical {
    /// Element kind discriminator ("layer", "fragment")
    pub kind: &'static str,
    /// Template id for layers, fragment name for fragments
    pub template: String,
    /// Slot name to child identities, in declaration order
    pub slots: Vec<(String, Vec<ChildId>)>,
    /// Static variables / data overrides, sorted by key
    pub variables: VarMap,
}

impl Canonical {
    /// Canonical form of a composite layer
    pub fn layer(template: &str, slots: &Slots, variables: &VarMap) -> Self {
        let slots = slots
            .iter()
            .map(|(name, refs)| {
                let children = refs
                    .iter()
                    .map(|child| match child {
                        ChildRef::Instance(element) => ChildId::Slug(element.slug()),
                        ChildRef::Deferred(descriptor) => ChildId::Deferred(descriptor.clone()),
                    })
                    .collect();
                (name.clone(), children)
            })
            .collect();

        Canonical {
            kind: "layer",
            template: template.to_string(),
            slots,
            variables: variables.clone(),
        }
    }

    /// Canonical form of a fragment leaf
    pub fn fragment(name: &str, overrides: &VarMap) -> Self {
        Canonical {
            kind: "fragment",
            template: name.to_string(),
            slots: Vec::new(),
            variables: overrides.clone(),
        }
    }
}

/// Compute the slug for a canonical description
///
/// Slug = hash(kind || template || slots || variables), with every
/// variable-length field length-prefixed (8 bytes, big-endian) for
/// determinism. Child slugs fold the whole subtree's declarative state into
/// the parent's address.
pub fn compute_slug(canonical: &Canonical) -> Slug {
    let mut hasher = Hasher::new();

    // Kind discriminator
    hasher.update(b"dais:");
    hasher.update(canonical.kind.as_bytes());

    // Template id
    hasher.update(&(canonical.template.len() as u64).to_be_bytes());
    hasher.update(canonical.template.as_bytes());

    // Slots, in declaration order
    hasher.update(&(canonical.slots.len() as u64).to_be_bytes());
    for (name, children) in &canonical.slots {
        hasher.update(&(name.len() as u64).to_be_bytes());
        hasher.update(name.as_bytes());

        hasher.update(&(children.len() as u64).to_be_bytes());
        for child in children {
            match child {
                ChildId::Slug(slug) => {
                    hasher.update(b"node:");
                    hasher.update(slug.as_bytes());
                }
                ChildId::Deferred(descriptor) => {
                    hasher.update(b"deferred:");
                    hasher.update(&(descriptor.len() as u64).to_be_bytes());
                    hasher.update(descriptor.as_bytes());
                }
            }
        }
    }

    // Variables (sorted by key; serde_json renders objects with sorted keys)
    hasher.update(&(canonical.variables.len() as u64).to_be_bytes());
    for (key, value) in &canonical.variables {
        hasher.update(&(key.len() as u64).to_be_bytes());
        hasher.update(key.as_bytes());
        hasher.update(value.to_string().as_bytes());
        hasher.update(b"\n");
    }

    Slug::from_bytes(*hasher.finalize().as_bytes())
}
