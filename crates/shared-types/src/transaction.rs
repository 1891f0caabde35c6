//! Validated transactions as stored by the transaction pool.

use crate::Extrinsic;
use serde::{Deserialize, Serialize};

/// Where a transaction entered the node from.
///
/// The tag byte prefixes the executor's `validate_transaction` input and
/// affects validation policy, so it must survive any re-encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TransactionSource {
    /// Already included in a block.
    InBlock = 0,
    /// Authored by this node.
    Local = 1,
    /// Received from the network.
    External = 2,
}

impl TransactionSource {
    /// The wire tag byte.
    pub fn tag_byte(self) -> u8 {
        self as u8
    }
}

/// Externally-computed validity metadata for a pooled transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validity {
    /// Pool ordering priority; higher is drained first.
    pub priority: u64,
    /// Tags this transaction requires to be provided first.
    pub requires: Vec<Vec<u8>>,
    /// Tags this transaction provides.
    pub provides: Vec<Vec<u8>>,
    /// How many blocks the validity holds for.
    pub longevity: u64,
    /// Whether the transaction may be gossiped.
    pub propagate: bool,
}

/// A transaction that passed pool validation.
///
/// The pool owns these; the assembler borrows them and may requeue or drop
/// them but never mutates the extrinsic bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidTransaction {
    /// The opaque extrinsic bytes.
    pub extrinsic: Extrinsic,
    /// Validity metadata from the executor.
    pub validity: Validity,
}

impl ValidTransaction {
    /// Pair an extrinsic with its validity.
    pub fn new(extrinsic: Extrinsic, validity: Validity) -> Self {
        Self {
            extrinsic,
            validity,
        }
    }
}
