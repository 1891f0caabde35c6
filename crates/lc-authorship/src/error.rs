//! Error types for the authoring subsystem.

use thiserror::Error;

/// Result type alias for authoring operations.
pub type Result<T> = std::result::Result<T, AuthorshipError>;

/// Errors that can abort one block-build attempt.
///
/// None of these are fatal to the service: the slot driver records the error
/// and moves on to the next slot. Losing the lottery is not represented here
/// at all; it is an `Option::None` on the claim path.
#[derive(Debug, Error)]
pub enum AuthorshipError {
    /// `build_block` was invoked without a prior successful lottery claim
    /// for the slot. Caller bug.
    #[error("not authorized to produce block in slot {slot}")]
    NotAuthorized {
        /// The unclaimed slot number.
        slot: u64,
    },

    /// The executor rejected block initialization.
    #[error("cannot initialise block: {0}")]
    InitializeBlock(String),

    /// The executor failed to produce or apply inherent extrinsics.
    #[error("cannot build inherents: {0}")]
    Inherents(String),

    /// An applied pool transaction was rejected as invalid. The offender is
    /// dropped, unattempted transactions stay at the pool front, and the
    /// build aborts.
    ///
    /// The message format embeds the executor's rejection category and is
    /// relied upon by downstream tooling; do not reword it.
    #[error("cannot build extrinsics: error applying extrinsic: Apply error, type: {category}")]
    ExtrinsicInvalid {
        /// Executor rejection category, e.g. "Payment".
        category: String,
    },

    /// The executor failed while applying or finalizing extrinsics.
    #[error("cannot build extrinsics: {0}")]
    Extrinsics(String),

    /// The slot's wall-clock budget ran out before a block could be
    /// finalized.
    #[error("slot {slot} budget exhausted before the block could be built")]
    SlotExpired {
        /// The expired slot number.
        slot: u64,
    },

    /// Signing or verification failure in the seal path.
    #[error("seal error: {0}")]
    Seal(#[from] shared_crypto::CryptoError),

    /// Chain-state lookup failure (best header, runtime handle).
    #[error("block state error: {0}")]
    BlockState(String),
}

impl AuthorshipError {
    /// Whether the next slot may reasonably succeed after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::NotAuthorized { .. })
    }

    /// Whether this error indicates a caller bug rather than an
    /// environmental failure.
    pub fn is_caller_bug(&self) -> bool {
        matches!(self, Self::NotAuthorized { .. })
    }
}
