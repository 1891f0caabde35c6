//! Outbound ports: capabilities the authoring engine requires from its
//! environment.
//!
//! The engine never touches chain state, executes extrinsics or orders
//! transactions itself; it drives these traits. Adapters live with their
//! owning subsystems, except the in-memory pool shipped under
//! `crate::adapters` for single-node use.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{Hash, Header, TransactionSource, ValidTransaction, Validity};
use thiserror::Error;

use crate::domain::InherentData;

/// Opaque executor failure, surfaced verbatim in authoring errors.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ExecutorError(pub String);

impl ExecutorError {
    /// Wrap an executor failure message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Opaque chain-state failure.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct BlockStateError(pub String);

impl BlockStateError {
    /// Wrap a chain-state failure message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Category attached to an invalid-transaction rejection.
///
/// The index is part of the executor's two-byte apply code and the `Display`
/// strings feed directly into authoring error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidKind {
    /// The call itself cannot be dispatched.
    Call,
    /// The sender cannot pay for inclusion.
    Payment,
    /// The transaction is outdated (nonce too low, already included).
    Stale,
    /// The transaction is not yet valid (nonce gap).
    Future,
    /// Signature or proof verification failed.
    BadProof,
}

impl InvalidKind {
    /// Decode from the second apply-code byte. Unknown indices collapse to
    /// [`InvalidKind::Call`].
    pub fn from_index(index: u8) -> Self {
        match index {
            1 => Self::Payment,
            2 => Self::Stale,
            3 => Self::Future,
            4 => Self::BadProof,
            _ => Self::Call,
        }
    }
}

impl std::fmt::Display for InvalidKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Call => "Call",
            Self::Payment => "Payment",
            Self::Stale => "Stale",
            Self::Future => "Future",
            Self::BadProof => "BadProof",
        };
        f.write_str(name)
    }
}

/// Decoded outcome of `apply_extrinsic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The extrinsic was applied and belongs in the block body.
    Included,
    /// The extrinsic did not fit the remaining block resources. It stays
    /// valid and must be returned to the pool.
    Exhausted,
    /// The extrinsic was rejected and must be dropped.
    Invalid(InvalidKind),
}

impl ApplyOutcome {
    /// Decode the executor's two-byte apply code.
    ///
    /// `[0, _]` is inclusion, a leading `2` is resource exhaustion, and a
    /// leading `1` (or anything else) is invalidity with the category in the
    /// second byte.
    pub fn from_code(code: [u8; 2]) -> Self {
        match code[0] {
            0 => Self::Included,
            2 => Self::Exhausted,
            _ => Self::Invalid(InvalidKind::from_index(code[1])),
        }
    }
}

/// Version identity of a runtime instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeVersion {
    /// Incremented on any logic change.
    pub spec_version: u32,
    /// Incremented when the extrinsic format changes.
    pub transaction_version: u32,
}

/// The state-transition runtime driven during block assembly.
///
/// One instance holds the open-block state between `initialize_block` and
/// `finalize_block`; callers must not interleave builds on a single instance.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Begin a new block on top of the provisional header's parent.
    async fn initialize_block(&self, header: &Header) -> Result<(), ExecutorError>;

    /// Produce the encoded inherent extrinsics for this block.
    async fn inherent_extrinsics(
        &self,
        data: &InherentData,
    ) -> Result<Vec<Vec<u8>>, ExecutorError>;

    /// Apply one encoded extrinsic to the open block, returning the two-byte
    /// apply code (see [`ApplyOutcome::from_code`]).
    async fn apply_extrinsic(&self, extrinsic: &[u8]) -> Result<[u8; 2], ExecutorError>;

    /// Close the open block and return the completed header with roots and
    /// any consensus digest items filled in.
    async fn finalize_block(&self) -> Result<Header, ExecutorError>;

    /// Validate a candidate pool transaction. The `source` tag byte prefixes
    /// the encoded input.
    async fn validate_transaction(
        &self,
        source: TransactionSource,
        extrinsic: &[u8],
    ) -> Result<Validity, ExecutorError>;

    /// The runtime's encoded metadata blob.
    async fn metadata(&self) -> Result<Vec<u8>, ExecutorError>;

    /// The runtime's version identity.
    fn version(&self) -> RuntimeVersion;
}

/// Priority-ordered source of validated transactions.
///
/// `pop` followed by `requeue_front` must compose atomically with respect to
/// concurrent callers.
pub trait TransactionPool: Send + Sync {
    /// Insert by priority. Returns whether the transaction was inserted,
    /// together with the displaced entry when an identical extrinsic was
    /// already pooled.
    fn push(&self, tx: ValidTransaction) -> (bool, Option<ValidTransaction>);

    /// Remove and return the highest-priority transaction.
    fn pop(&self) -> Option<ValidTransaction>;

    /// The highest-priority transaction without removing it.
    fn peek(&self) -> Option<ValidTransaction>;

    /// Return a popped transaction to the front of the queue.
    fn requeue_front(&self, tx: ValidTransaction);

    /// Number of pooled transactions.
    fn len(&self) -> usize;

    /// Whether the pool holds no transactions.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read and write access to chain state as seen by the authoring engine.
#[async_trait]
pub trait BlockState: Send + Sync {
    /// The header of the current best block.
    async fn best_block_header(&self) -> Result<Header, BlockStateError>;

    /// The genesis block hash.
    fn genesis_hash(&self) -> Hash;

    /// The runtime instance for building on `parent`; `None` selects the
    /// best block's runtime.
    async fn get_runtime(
        &self,
        parent: Option<Hash>,
    ) -> Result<Arc<dyn Executor>, BlockStateError>;

    /// Register the post-build runtime instance under the new block's hash.
    async fn store_runtime(
        &self,
        block_hash: Hash,
        runtime: Arc<dyn Executor>,
    ) -> Result<(), BlockStateError>;
}
