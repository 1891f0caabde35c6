//! Inbound ports: the API a slot driver uses to drive authoring.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{Block, EpochIndex, Slot};

use crate::domain::EpochData;
use crate::error::Result;
use crate::metrics::BuildMetrics;

/// Per-slot authoring entry point.
#[async_trait]
pub trait SlotAuthoring: Send + Sync {
    /// Run the lottery for `slot` and, on a win, build and seal a block.
    ///
    /// `Ok(None)` means the lottery was lost; errors mean a claimed slot's
    /// build failed.
    async fn handle_slot(&self, slot: Slot, epoch: EpochIndex) -> Result<Option<Block>>;

    /// Replace the epoch parameters wholesale. Pending slot claims made under
    /// the previous epoch are discarded.
    fn set_epoch_data(&self, epoch_data: EpochData);

    /// The service's metrics collector.
    fn metrics(&self) -> Arc<BuildMetrics>;
}
