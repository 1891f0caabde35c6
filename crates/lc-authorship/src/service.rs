//! The authoring service: lottery, assembly and sealing behind the
//! [`SlotAuthoring`] inbound port.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_crypto::Sr25519Keypair;
use shared_types::{Block, EpochIndex, Slot};
use tracing::{debug, error, info};

use crate::domain::{block_hash, run_lottery, BlockBuilder, EpochData, SlotProofStore};
use crate::error::{AuthorshipError, Result};
use crate::metrics::BuildMetrics;
use crate::ports::inbound::SlotAuthoring;
use crate::ports::outbound::{BlockState, TransactionPool};

/// Construction-time wiring for [`AuthorshipService`].
pub struct ServiceConfig {
    /// This node's authority keypair.
    pub keypair: Arc<Sr25519Keypair>,
    /// Source of pool transactions.
    pub pool: Arc<dyn TransactionPool>,
    /// Chain-state access.
    pub block_state: Arc<dyn BlockState>,
    /// Initial epoch parameters.
    pub epoch_data: EpochData,
    /// Metrics collector, shared with the operator surface.
    pub metrics: Arc<BuildMetrics>,
}

/// Production implementation of [`SlotAuthoring`].
pub struct AuthorshipService {
    keypair: Arc<Sr25519Keypair>,
    pool: Arc<dyn TransactionPool>,
    block_state: Arc<dyn BlockState>,
    epoch_data: RwLock<EpochData>,
    proofs: Arc<SlotProofStore>,
    metrics: Arc<BuildMetrics>,
}

impl AuthorshipService {
    /// Wire up a service from its collaborators.
    pub fn new(config: ServiceConfig) -> Self {
        info!(
            authority_index = config.epoch_data.authority_index,
            authorities = config.epoch_data.authorities.len(),
            "[lc-authorship] service initialized"
        );
        Self {
            keypair: config.keypair,
            pool: config.pool,
            block_state: config.block_state,
            epoch_data: RwLock::new(config.epoch_data),
            proofs: Arc::new(SlotProofStore::new()),
            metrics: config.metrics,
        }
    }

    async fn build(&self, slot: &Slot, epoch_data: &EpochData) -> Result<Block> {
        let parent = self
            .block_state
            .best_block_header()
            .await
            .map_err(|e| AuthorshipError::BlockState(e.to_string()))?;
        let executor = self
            .block_state
            .get_runtime(None)
            .await
            .map_err(|e| AuthorshipError::BlockState(e.to_string()))?;

        let builder = BlockBuilder::new(
            self.keypair.clone(),
            self.pool.clone(),
            self.proofs.clone(),
            epoch_data.authority_index,
        );

        let started = Instant::now();
        let outcome = builder.build_block(slot, &parent, executor.as_ref()).await;
        self.metrics.record_build_time(started.elapsed());

        match outcome {
            Ok(block) => {
                // The block only counts as built once its runtime is stored;
                // a storage failure is a failed attempt like any other.
                if let Err(e) = self
                    .block_state
                    .store_runtime(block_hash(&block.header), executor)
                    .await
                {
                    self.metrics.record_build_error();
                    return Err(AuthorshipError::BlockState(e.to_string()));
                }
                self.metrics.record_block_built(block.body.len());
                Ok(block)
            }
            Err(err) => {
                self.metrics.record_build_error();
                Err(err)
            }
        }
    }
}

#[async_trait]
impl SlotAuthoring for AuthorshipService {
    async fn handle_slot(&self, slot: Slot, epoch: EpochIndex) -> Result<Option<Block>> {
        let epoch_data = self.epoch_data.read().clone();

        let claim = self.proofs.claim_with(slot.number, || {
            run_lottery(slot.number, epoch, &epoch_data, &self.keypair)
        });
        if claim.is_none() {
            self.metrics.record_slot_skipped();
            debug!(slot = slot.number, "[lc-authorship] slot not claimed");
            return Ok(None);
        }
        self.metrics.record_slot_claimed();

        match self.build(&slot, &epoch_data).await {
            Ok(block) => {
                info!(
                    slot = slot.number,
                    number = block.header.number,
                    extrinsics = block.body.len(),
                    "[lc-authorship] block built"
                );
                Ok(Some(block))
            }
            Err(err) => {
                error!(slot = slot.number, %err, "[lc-authorship] build failed");
                Err(err)
            }
        }
    }

    fn set_epoch_data(&self, epoch_data: EpochData) {
        info!(
            authority_index = epoch_data.authority_index,
            authorities = epoch_data.authorities.len(),
            "[lc-authorship] epoch data replaced"
        );
        *self.epoch_data.write() = epoch_data;
        // Claims made under the previous epoch's randomness are void.
        self.proofs.clear();
    }

    fn metrics(&self) -> Arc<BuildMetrics> {
        self.metrics.clone()
    }
}
