//! # Core Chain Entities
//!
//! Defines the data model shared by the authoring engine and its
//! collaborators: slots, headers, digests, blocks and validated
//! transactions.
//!
//! ## Clusters
//!
//! - **Timing**: [`Slot`], [`EpochIndex`]
//! - **Chain**: [`Header`], [`Block`], [`Body`], [`Extrinsic`]
//! - **Digests**: [`Digest`], [`DigestItem`], [`PreDigest`], [`Seal`]
//! - **Transactions**: [`ValidTransaction`], [`Validity`],
//!   [`TransactionSource`]
//!
//! Digest items and headers carry an explicit binary encoding because
//! independently-implemented nodes must agree on it byte for byte.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod block;
mod digest;
mod header;
mod slot;
mod transaction;

pub use block::{Block, Body, Extrinsic};
pub use digest::{
    Digest, DigestItem, PreDigest, Seal, CONSENSUS_TAG, PRE_RUNTIME_TAG, SEAL_TAG,
};
pub use header::Header;
pub use slot::Slot;
pub use transaction::{TransactionSource, ValidTransaction, Validity};

/// A 32-byte hash.
pub type Hash = [u8; 32];

/// Epoch identifier: a contiguous run of slots sharing one authority set,
/// randomness seed and threshold.
pub type EpochIndex = u64;

/// Decoding errors for the wire encodings defined in this crate.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Input ended before the encoding was complete.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A digest item carried an unknown type tag.
    #[error("unknown digest type tag: {0}")]
    UnknownDigestTag(u8),

    /// A fixed-size payload had the wrong length.
    #[error("invalid payload length: expected {expected}, got {got}")]
    InvalidLength {
        /// Required payload length.
        expected: usize,
        /// Length actually present.
        got: usize,
    },
}
