//! Blocks, bodies and extrinsics.

use crate::Header;
use serde::{Deserialize, Serialize};

/// An opaque extrinsic: the byte string handed to the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extrinsic(pub Vec<u8>);

impl Extrinsic {
    /// Wrap raw extrinsic bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Extrinsic {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Ordered sequence of extrinsics forming a block body.
///
/// Order is exactly the order extrinsics were applied: inherents first, then
/// pool transactions as popped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body(pub Vec<Extrinsic>);

impl Body {
    /// Empty body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of extrinsics.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the body holds no extrinsics.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append an extrinsic.
    pub fn push(&mut self, ext: Extrinsic) {
        self.0.push(ext);
    }

    /// Exact byte-for-byte membership check.
    pub fn has_extrinsic(&self, bytes: &[u8]) -> bool {
        self.0.iter().any(|ext| ext.as_bytes() == bytes)
    }
}

/// A complete block: header plus body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// The sealed header.
    pub header: Header,
    /// The ordered body.
    pub body: Body,
}
