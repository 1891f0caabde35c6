//! Header digest items and their binary framing.
//!
//! Every digest item is a tagged union on the wire:
//!
//! ```text
//! type tag: u8 | payload length: u32 LE | payload bytes
//! ```
//!
//! Consumers must preserve item order (pre-digest first, seal last) and must
//! never reinterpret payload bytes across tags.

use crate::DecodeError;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

/// Type tag for consensus-engine payloads injected by the executor.
pub const CONSENSUS_TAG: u8 = 4;

/// Type tag for the seal (last digest item of a complete header).
pub const SEAL_TAG: u8 = 5;

/// Type tag for the pre-runtime digest (first digest item).
pub const PRE_RUNTIME_TAG: u8 = 6;

/// Proof of slot-claim eligibility, attached to a header before the block
/// body is known.
///
/// `authority_index` and the seal's signer must refer to the same authority.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreDigest {
    /// Claiming authority's position in the epoch authority set.
    pub authority_index: u32,
    /// The claimed slot.
    pub slot_number: u64,
    /// VRF output for `(randomness, epoch, slot)`.
    pub vrf_output: [u8; 32],
    /// VRF proof that the output was computed with the authority's key.
    #[serde_as(as = "Bytes")]
    pub vrf_proof: [u8; 64],
}

impl PreDigest {
    /// Encoded payload size.
    pub const ENCODED_LEN: usize = 4 + 8 + 32 + 64;

    /// Serialize the payload (without the type tag).
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::ENCODED_LEN);
        out.extend_from_slice(&self.authority_index.to_le_bytes());
        out.extend_from_slice(&self.slot_number.to_le_bytes());
        out.extend_from_slice(&self.vrf_output);
        out.extend_from_slice(&self.vrf_proof);
        out
    }

    /// Deserialize a payload produced by [`PreDigest::encode`].
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        if payload.len() != Self::ENCODED_LEN {
            return Err(DecodeError::InvalidLength {
                expected: Self::ENCODED_LEN,
                got: payload.len(),
            });
        }
        let mut authority_index = [0u8; 4];
        authority_index.copy_from_slice(&payload[0..4]);
        let mut slot_number = [0u8; 8];
        slot_number.copy_from_slice(&payload[4..12]);
        let mut vrf_output = [0u8; 32];
        vrf_output.copy_from_slice(&payload[12..44]);
        let mut vrf_proof = [0u8; 64];
        vrf_proof.copy_from_slice(&payload[44..108]);
        Ok(Self {
            authority_index: u32::from_le_bytes(authority_index),
            slot_number: u64::from_le_bytes(slot_number),
            vrf_output,
            vrf_proof,
        })
    }
}

/// The final signature over a block's hash, proving authorship.
///
/// The signer is implicit: it must be the authority named by the header's
/// pre-digest.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seal {
    /// sr25519 signature over the finalized header hash.
    #[serde_as(as = "Bytes")]
    pub signature: [u8; 64],
}

impl Seal {
    /// Encoded payload size.
    pub const ENCODED_LEN: usize = 64;

    /// Deserialize a 64-byte seal payload.
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        if payload.len() != Self::ENCODED_LEN {
            return Err(DecodeError::InvalidLength {
                expected: Self::ENCODED_LEN,
                got: payload.len(),
            });
        }
        let mut signature = [0u8; 64];
        signature.copy_from_slice(payload);
        Ok(Self { signature })
    }
}

/// One item of a header digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DigestItem {
    /// Slot-claim proof; always the first item.
    PreRuntime(PreDigest),
    /// Opaque consensus-engine payload injected by the executor.
    Consensus(Vec<u8>),
    /// Authorship signature; always the last item of a complete header.
    Seal(Seal),
}

impl DigestItem {
    /// The item's wire type tag.
    pub fn type_tag(&self) -> u8 {
        match self {
            DigestItem::PreRuntime(_) => PRE_RUNTIME_TAG,
            DigestItem::Consensus(_) => CONSENSUS_TAG,
            DigestItem::Seal(_) => SEAL_TAG,
        }
    }

    /// Serialize as `tag | len | payload`.
    pub fn encode(&self) -> Vec<u8> {
        let payload = match self {
            DigestItem::PreRuntime(pre) => pre.encode(),
            DigestItem::Consensus(bytes) => bytes.clone(),
            DigestItem::Seal(seal) => seal.signature.to_vec(),
        };
        let mut out = Vec::with_capacity(1 + 4 + payload.len());
        out.push(self.type_tag());
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&payload);
        out
    }

    /// Deserialize one item from the front of `input`, returning it together
    /// with the number of bytes consumed.
    pub fn decode(input: &[u8]) -> Result<(Self, usize), DecodeError> {
        if input.len() < 5 {
            return Err(DecodeError::UnexpectedEof);
        }
        let tag = input[0];
        let mut len = [0u8; 4];
        len.copy_from_slice(&input[1..5]);
        let len = u32::from_le_bytes(len) as usize;
        let end = 5usize.checked_add(len).ok_or(DecodeError::UnexpectedEof)?;
        if input.len() < end {
            return Err(DecodeError::UnexpectedEof);
        }
        let payload = &input[5..end];
        let item = match tag {
            PRE_RUNTIME_TAG => DigestItem::PreRuntime(PreDigest::decode(payload)?),
            CONSENSUS_TAG => DigestItem::Consensus(payload.to_vec()),
            SEAL_TAG => DigestItem::Seal(Seal::decode(payload)?),
            other => return Err(DecodeError::UnknownDigestTag(other)),
        };
        Ok((item, end))
    }
}

/// Ordered sequence of digest items.
///
/// A complete header's digest is `[PreRuntime, ...k consensus items, Seal]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest {
    /// Items in wire order.
    pub logs: Vec<DigestItem>,
}

impl Digest {
    /// Empty digest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item.
    pub fn push(&mut self, item: DigestItem) {
        self.logs.push(item);
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.logs.len()
    }

    /// Whether the digest holds no items.
    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    /// The pre-runtime item, if the digest starts with one.
    pub fn pre_runtime(&self) -> Option<&PreDigest> {
        match self.logs.first() {
            Some(DigestItem::PreRuntime(pre)) => Some(pre),
            _ => None,
        }
    }

    /// The seal, if the digest ends with one.
    pub fn seal(&self) -> Option<&Seal> {
        match self.logs.last() {
            Some(DigestItem::Seal(seal)) => Some(seal),
            _ => None,
        }
    }

    /// Serialize as `count: u32 LE | items`.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(self.logs.len() as u32).to_le_bytes());
        for item in &self.logs {
            out.extend_from_slice(&item.encode());
        }
        out
    }

    /// Deserialize a digest produced by [`Digest::encode`].
    pub fn decode(input: &[u8]) -> Result<Self, DecodeError> {
        if input.len() < 4 {
            return Err(DecodeError::UnexpectedEof);
        }
        let mut count = [0u8; 4];
        count.copy_from_slice(&input[0..4]);
        let count = u32::from_le_bytes(count);
        // Each item occupies at least 5 bytes, which bounds the
        // preallocation for hostile counts.
        let mut logs = Vec::with_capacity((count as usize).min(input.len() / 5));
        let mut cursor = 4usize;
        for _ in 0..count {
            let (item, consumed) = DigestItem::decode(&input[cursor..])?;
            logs.push(item);
            cursor += consumed;
        }
        Ok(Self { logs })
    }
}
