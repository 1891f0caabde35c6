//! Metrics collection for block authoring.
//!
//! An injected capability object, never process-global state: each service
//! instance owns an `Arc<BuildMetrics>`, which keeps unit tests deterministic
//! without registry resets.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Counters and timers for block-build outcomes.
#[derive(Debug, Default)]
pub struct BuildMetrics {
    /// Blocks successfully built and sealed.
    pub blocks_built: AtomicU64,

    /// Build attempts that aborted with an error.
    pub build_errors: AtomicU64,

    /// Build attempts timed (success or failure).
    pub builds_timed: AtomicU64,

    /// Total build duration across timed attempts (milliseconds).
    pub build_time_ms: AtomicU64,

    /// Extrinsics included across all built blocks (inherents + pool).
    pub extrinsics_included: AtomicU64,

    /// Slots where the lottery produced a claim.
    pub slots_claimed: AtomicU64,

    /// Slots where the lottery produced no claim.
    pub slots_skipped: AtomicU64,
}

impl BuildMetrics {
    /// Create new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a build attempt's duration, regardless of outcome.
    pub fn record_build_time(&self, duration: Duration) {
        self.builds_timed.fetch_add(1, Ordering::Relaxed);
        self.build_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record a successfully sealed block.
    pub fn record_block_built(&self, extrinsic_count: usize) {
        self.blocks_built.fetch_add(1, Ordering::Relaxed);
        self.extrinsics_included
            .fetch_add(extrinsic_count as u64, Ordering::Relaxed);
    }

    /// Record an aborted build attempt.
    pub fn record_build_error(&self) {
        self.build_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a won lottery.
    pub fn record_slot_claimed(&self) {
        self.slots_claimed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lost lottery.
    pub fn record_slot_skipped(&self) {
        self.slots_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Get blocks built.
    pub fn get_blocks_built(&self) -> u64 {
        self.blocks_built.load(Ordering::Relaxed)
    }

    /// Get aborted build attempts.
    pub fn get_build_errors(&self) -> u64 {
        self.build_errors.load(Ordering::Relaxed)
    }

    /// Get timed build attempts.
    pub fn get_builds_timed(&self) -> u64 {
        self.builds_timed.load(Ordering::Relaxed)
    }

    /// Get average build duration in milliseconds.
    pub fn get_avg_build_time_ms(&self) -> f64 {
        let builds = self.builds_timed.load(Ordering::Relaxed);
        if builds == 0 {
            return 0.0;
        }
        self.build_time_ms.load(Ordering::Relaxed) as f64 / builds as f64
    }
}
