//! Inherent data: per-block facts injected by the author rather than
//! submitted by users.

use std::time::{SystemTime, UNIX_EPOCH};

/// Facts the executor turns into inherent extrinsics at the start of a
/// block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InherentData {
    /// Wall-clock timestamp at build time, milliseconds since the Unix
    /// epoch.
    pub timestamp_ms: u64,
    /// The slot this block is claimed for.
    pub slot: u64,
}

impl InherentData {
    /// Capture the current timestamp for `slot`.
    pub fn new(slot: u64) -> Self {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self { timestamp_ms, slot }
    }

    /// Fixed 16-byte encoding: `timestamp_ms LE | slot LE`.
    pub fn encode(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[0..8].copy_from_slice(&self.timestamp_ms.to_le_bytes());
        out[8..16].copy_from_slice(&self.slot.to_le_bytes());
        out
    }
}
