//! Authoring slots.

use std::time::{Duration, Instant};

/// One block-authoring opportunity: a fixed window of wall-clock time with a
/// monotonically increasing number.
///
/// Immutable once constructed. The number is what the lottery and the
/// pre-digest bind to; start/duration only drive the build-time budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Wall-clock start of the slot.
    pub start: Instant,
    /// Length of the slot.
    pub duration: Duration,
    /// Slot number.
    pub number: u64,
}

impl Slot {
    /// Create a slot starting now.
    pub fn new(number: u64, duration: Duration) -> Self {
        Self {
            start: Instant::now(),
            duration,
            number,
        }
    }

    /// The instant at which the slot's authoring budget runs out.
    pub fn ends_at(&self) -> Instant {
        self.start + self.duration
    }

    /// Whether the authoring budget has already run out.
    pub fn has_ended(&self) -> bool {
        Instant::now() >= self.ends_at()
    }

    /// Hard deadline: one extra slot length of grace for finalizing and
    /// sealing a block whose drain loop ran up to `ends_at`.
    pub fn hard_deadline(&self) -> Instant {
        self.start + self.duration * 2
    }
}
