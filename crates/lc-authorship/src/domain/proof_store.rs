//! Write-once store for winning lottery proofs.
//!
//! The lottery runs when a slot opens; the proof is consumed later when the
//! block is assembled. The store is keyed by slot number and write-once per
//! slot, so re-running a slot cannot change an already-recorded claim.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::AuthorshipProof;

/// Slot number to winning proof, for the current epoch only.
#[derive(Debug, Default)]
pub struct SlotProofStore {
    proofs: RwLock<HashMap<u64, AuthorshipProof>>,
}

impl SlotProofStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded proof for `slot`, if any.
    pub fn lookup(&self, slot: u64) -> Option<AuthorshipProof> {
        self.proofs.read().get(&slot).copied()
    }

    /// Record the result of `lottery` for `slot`, unless the slot was
    /// already decided. Returns the proof in effect afterwards.
    ///
    /// The write lock is held across the lottery evaluation so concurrent
    /// callers for the same slot observe one decision.
    pub fn claim_with<F>(&self, slot: u64, lottery: F) -> Option<AuthorshipProof>
    where
        F: FnOnce() -> Option<AuthorshipProof>,
    {
        let mut proofs = self.proofs.write();
        if let Some(existing) = proofs.get(&slot) {
            return Some(*existing);
        }
        let proof = lottery()?;
        proofs.insert(slot, proof);
        Some(proof)
    }

    /// Discard all recorded proofs. Called on epoch change.
    pub fn clear(&self) {
        self.proofs.write().clear();
    }

    /// Number of recorded proofs.
    pub fn len(&self) -> usize {
        self.proofs.read().len()
    }

    /// Whether no proofs are recorded.
    pub fn is_empty(&self) -> bool {
        self.proofs.read().is_empty()
    }
}
