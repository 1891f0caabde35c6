//! Block assembly.
//!
//! One [`BlockBuilder`] turns a claimed slot into a sealed block:
//!
//! 1. attach the pre-digest proving the claim,
//! 2. initialize the block on the executor,
//! 3. apply inherent extrinsics,
//! 4. drain pool transactions until the slot budget runs out,
//! 5. finalize, then sign and append the seal.
//!
//! The builder holds no open-block state of its own; everything between
//! initialize and finalize lives in the executor instance.

use std::sync::Arc;
use std::time::Instant;

use shared_types::{Block, Body, DigestItem, Extrinsic, Header, PreDigest, Slot};
use tracing::{debug, warn};

use crate::domain::{build_seal, block_hash, InherentData, SlotProofStore};
use crate::error::{AuthorshipError, Result};
use crate::ports::outbound::{ApplyOutcome, Executor, TransactionPool};
use shared_crypto::Sr25519Keypair;

/// Assembles and seals one block for a claimed slot.
pub struct BlockBuilder {
    keypair: Arc<Sr25519Keypair>,
    pool: Arc<dyn TransactionPool>,
    proofs: Arc<SlotProofStore>,
    authority_index: u32,
}

impl BlockBuilder {
    /// Create a builder over the given collaborators.
    pub fn new(
        keypair: Arc<Sr25519Keypair>,
        pool: Arc<dyn TransactionPool>,
        proofs: Arc<SlotProofStore>,
        authority_index: u32,
    ) -> Self {
        Self {
            keypair,
            pool,
            proofs,
            authority_index,
        }
    }

    /// The pre-digest for `slot`, from the recorded lottery proof.
    ///
    /// Fails with [`AuthorshipError::NotAuthorized`] when no proof exists:
    /// building without a claim is a caller bug, not a lost lottery.
    pub fn build_pre_digest(&self, slot: &Slot) -> Result<PreDigest> {
        let proof = self
            .proofs
            .lookup(slot.number)
            .ok_or(AuthorshipError::NotAuthorized { slot: slot.number })?;
        Ok(PreDigest {
            authority_index: self.authority_index,
            slot_number: slot.number,
            vrf_output: proof.output.0,
            vrf_proof: proof.proof.0,
        })
    }

    /// Build and seal a block on top of `parent` for the claimed `slot`.
    pub async fn build_block(
        &self,
        slot: &Slot,
        parent: &Header,
        executor: &dyn Executor,
    ) -> Result<Block> {
        let pre_digest = self.build_pre_digest(slot)?;

        if slot.has_ended() {
            return Err(AuthorshipError::SlotExpired { slot: slot.number });
        }

        let mut digest = shared_types::Digest::new();
        digest.push(DigestItem::PreRuntime(pre_digest));
        let provisional = Header::provisional(block_hash(parent), parent.number + 1, digest);

        executor
            .initialize_block(&provisional)
            .await
            .map_err(|e| AuthorshipError::InitializeBlock(e.to_string()))?;

        let inherents = self.apply_inherents(slot, executor).await?;
        let transactions = self.drain_extrinsics(slot, executor).await?;

        if Instant::now() >= slot.hard_deadline() {
            warn!(slot = slot.number, "hard deadline passed before finalization");
            return Err(AuthorshipError::SlotExpired { slot: slot.number });
        }

        let mut header = executor
            .finalize_block()
            .await
            .map_err(|e| AuthorshipError::Extrinsics(e.to_string()))?;

        let seal = build_seal(&self.keypair, &header);
        header.digest.push(DigestItem::Seal(seal));

        let mut body = Body::new();
        for inherent in inherents {
            body.push(Extrinsic::new(inherent));
        }
        for tx in transactions {
            body.push(tx);
        }

        debug!(
            slot = slot.number,
            number = header.number,
            extrinsics = body.len(),
            "block assembled"
        );
        Ok(Block { header, body })
    }

    /// Produce and apply the block's inherent extrinsics. Every inherent
    /// must apply cleanly; anything else aborts the build.
    async fn apply_inherents(
        &self,
        slot: &Slot,
        executor: &dyn Executor,
    ) -> Result<Vec<Vec<u8>>> {
        let data = InherentData::new(slot.number);
        let inherents = executor
            .inherent_extrinsics(&data)
            .await
            .map_err(|e| AuthorshipError::Inherents(e.to_string()))?;

        for inherent in &inherents {
            let code = executor
                .apply_extrinsic(inherent)
                .await
                .map_err(|e| AuthorshipError::Inherents(e.to_string()))?;
            match ApplyOutcome::from_code(code) {
                ApplyOutcome::Included => {}
                other => {
                    return Err(AuthorshipError::Inherents(format!(
                        "inherent rejected: {other:?}"
                    )))
                }
            }
        }
        Ok(inherents)
    }

    /// Drain pool transactions into the open block until the slot budget
    /// runs out or the pool empties.
    ///
    /// Outcomes: `Included` consumes the transaction, `Exhausted` requeues
    /// it at the pool front and stops cleanly, `Invalid` drops it and aborts
    /// the build. Transactions never popped stay at the pool front.
    async fn drain_extrinsics(
        &self,
        slot: &Slot,
        executor: &dyn Executor,
    ) -> Result<Vec<Extrinsic>> {
        let mut included = Vec::new();
        let deadline = slot.ends_at();

        while Instant::now() < deadline {
            let Some(tx) = self.pool.pop() else {
                break;
            };

            let code = executor
                .apply_extrinsic(tx.extrinsic.as_bytes())
                .await
                .map_err(|e| AuthorshipError::Extrinsics(e.to_string()))?;

            match ApplyOutcome::from_code(code) {
                ApplyOutcome::Included => included.push(tx.extrinsic),
                ApplyOutcome::Exhausted => {
                    debug!(slot = slot.number, "block full, returning transaction to pool");
                    self.pool.requeue_front(tx);
                    break;
                }
                ApplyOutcome::Invalid(kind) => {
                    warn!(slot = slot.number, category = %kind, "dropping invalid transaction");
                    return Err(AuthorshipError::ExtrinsicInvalid {
                        category: kind.to_string(),
                    });
                }
            }
        }
        Ok(included)
    }
}
