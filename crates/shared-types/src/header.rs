//! Block headers.

use crate::{Digest, Hash};
use serde::{Deserialize, Serialize};

/// A block header.
///
/// Mid-assembly a header temporarily lacks `state_root`, `extrinsics_root`
/// and the seal; the executor fills the roots in during finalization and the
/// builder appends the seal last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Hash of the parent block.
    pub parent_hash: Hash,
    /// Block number (parent number + 1).
    pub number: u64,
    /// Root of the state trie after executing this block.
    pub state_root: Hash,
    /// Root over the block body's extrinsics.
    pub extrinsics_root: Hash,
    /// Ordered digest items; `[PreRuntime, ...consensus items, Seal]` once
    /// complete.
    pub digest: Digest,
}

impl Header {
    /// Build a provisional header for block initialization: roots are left
    /// zeroed and the digest carries only what the caller provides.
    pub fn provisional(parent_hash: Hash, number: u64, digest: Digest) -> Self {
        Self {
            parent_hash,
            number,
            state_root: Hash::default(),
            extrinsics_root: Hash::default(),
            digest,
        }
    }

    /// Canonical byte encoding; the block hash is computed over this.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(32 + 8 + 32 + 32 + 16);
        out.extend_from_slice(&self.parent_hash);
        out.extend_from_slice(&self.number.to_le_bytes());
        out.extend_from_slice(&self.state_root);
        out.extend_from_slice(&self.extrinsics_root);
        out.extend_from_slice(&self.digest.encode());
        out
    }
}
