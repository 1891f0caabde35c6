//! Epoch parameters for the slot lottery.

use shared_crypto::Sr25519PublicKey;
use shared_types::Hash;

/// One member of an epoch's authority set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authority {
    /// The authority's session key.
    pub key: Sr25519PublicKey,
    /// Stake-derived lottery weight.
    pub weight: u64,
}

/// Everything the lottery needs for one epoch, replaced wholesale on epoch
/// change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpochData {
    /// The ordered authority set; pre-digests index into this.
    pub authorities: Vec<Authority>,
    /// This node's position in `authorities`.
    pub authority_index: u32,
    /// Lottery constant as `(numerator, denominator)`: the fraction of slots
    /// expected to have at least one author.
    pub c: (u64, u64),
    /// This node's claim threshold on the 2^128 fixed-point scale,
    /// precomputed from `c` and the weights.
    pub threshold: u128,
    /// Epoch randomness seed fed into every lottery transcript.
    pub randomness: Hash,
}

impl EpochData {
    /// Sum of all authority weights.
    pub fn total_weight(&self) -> u64 {
        self.authorities.iter().map(|a| a.weight).sum()
    }

    /// The authority at `index`, if in range.
    pub fn authority(&self, index: u32) -> Option<&Authority> {
        self.authorities.get(index as usize)
    }
}
