//! Core value types shared across the composition engine.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Variable value carried through contexts and templates
pub type Value = serde_json::Value;

/// Sorted key/value map used for variables, overrides, and render data
///
/// `BTreeMap` keeps keys sorted, which gives canonical serialization for free.
pub type VarMap = std::collections::BTreeMap<String, Value>;

/// Error returned when parsing a slug from its hex form
#[derive(Debug, Error)]
#[error("Invalid slug: {0}")]
pub struct SlugParseError(pub String);

/// Content-derived address of a tree element
///
/// A slug is a BLAKE3 digest over an element's canonical declarative state.
/// It is the stable, client-visible handle used to request a partial rebuild
/// of exactly one subtree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slug([u8; 32]);

impl Slug {
    /// Wrap a raw 32-byte digest
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Slug(bytes)
    }

    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex encoding, the form embedded in markup and URLs
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slug({}..)", &self.to_hex()[..8])
    }
}

impl FromStr for Slug {
    type Err = SlugParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| SlugParseError(format!("{}: {}", s, e)))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| SlugParseError(format!("{}: expected 32 bytes", s)))?;
        Ok(Slug(bytes))
    }
}

impl Serialize for Slug {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Slug {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
