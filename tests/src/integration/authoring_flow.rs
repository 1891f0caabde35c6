//! # Authoring Flow Integration
//!
//! Drives the full slot-to-block pipeline against mock collaborators:
//! lottery claim, pre-digest attachment, inherents, finalization and seal,
//! with claim verification from the consumer's side.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use lc_authorship::adapters::InMemoryTransactionPool;
    use lc_authorship::domain::{block_hash, verify_seal, verify_slot_claim, EpochData};
    use lc_authorship::ports::inbound::SlotAuthoring;
    use lc_authorship::{AuthorshipError, AuthorshipService, BuildMetrics, ServiceConfig};
    use shared_crypto::Sr25519Keypair;
    use shared_types::Slot;

    use crate::integration::fixtures::{certain_epoch, MockBlockState, MockExecutor};

    const SLOT_DURATION: Duration = Duration::from_secs(5);

    struct Harness {
        service: AuthorshipService,
        keypair: Arc<Sr25519Keypair>,
        block_state: Arc<MockBlockState>,
        executor: Arc<MockExecutor>,
    }

    fn harness_with(executor: MockExecutor, epoch_data_for: fn(&Sr25519Keypair) -> EpochData) -> Harness {
        let keypair = Arc::new(Sr25519Keypair::generate());
        let executor = Arc::new(executor);
        let block_state = Arc::new(MockBlockState::new(executor.clone()));
        let service = AuthorshipService::new(ServiceConfig {
            keypair: keypair.clone(),
            pool: Arc::new(InMemoryTransactionPool::new()),
            block_state: block_state.clone(),
            epoch_data: epoch_data_for(&keypair),
            metrics: Arc::new(BuildMetrics::new()),
        });
        Harness {
            service,
            keypair,
            block_state,
            executor,
        }
    }

    fn harness() -> Harness {
        harness_with(MockExecutor::new(), certain_epoch)
    }

    #[tokio::test]
    async fn test_slot_to_sealed_block() {
        let h = harness();
        let slot = Slot::new(1, SLOT_DURATION);

        let block = h.service.handle_slot(slot, 0).await.unwrap().unwrap();

        // Digest shape: pre-runtime, one consensus item, seal.
        assert_eq!(block.header.digest.len(), 3);
        let pre = block.header.digest.pre_runtime().unwrap();
        assert_eq!(pre.slot_number, 1);
        assert_eq!(pre.authority_index, 0);
        assert!(block.header.digest.seal().is_some());

        // The seal verifies against the authority's key, and the claim
        // verifies against the epoch parameters.
        assert!(verify_seal(&h.keypair.public_key(), &block.header).is_ok());
        assert!(verify_slot_claim(pre, 0, &certain_epoch(&h.keypair)));

        // The inherent was applied and is in the body.
        assert_eq!(block.body.len(), 1);
        assert_eq!(h.executor.applied().len(), 1);

        // The new runtime was stored under the block's hash.
        assert_eq!(
            h.block_state.stored_runtimes(),
            vec![block_hash(&block.header)]
        );
    }

    #[tokio::test]
    async fn test_chain_extends_over_slots() {
        let h = harness();

        let mut parent_number = 0;
        for slot_number in 1..=3u64 {
            let slot = Slot::new(slot_number, SLOT_DURATION);
            let block = h.service.handle_slot(slot, 0).await.unwrap().unwrap();

            assert_eq!(block.header.number, parent_number + 1);
            parent_number = block.header.number;
            h.block_state.set_best(block.header);
        }

        assert_eq!(h.service.metrics().get_blocks_built(), 3);
    }

    #[tokio::test]
    async fn test_repeated_slot_reuses_claim() {
        let h = harness();
        let epoch = 0;

        let first = h
            .service
            .handle_slot(Slot::new(7, SLOT_DURATION), epoch)
            .await
            .unwrap()
            .unwrap();
        let second = h
            .service
            .handle_slot(Slot::new(7, SLOT_DURATION), epoch)
            .await
            .unwrap()
            .unwrap();

        // The recorded claim is write-once per slot, so both blocks carry
        // the same VRF output.
        let a = first.header.digest.pre_runtime().unwrap();
        let b = second.header.digest.pre_runtime().unwrap();
        assert_eq!(a.vrf_output, b.vrf_output);
        assert_eq!(a.vrf_proof, b.vrf_proof);
    }

    #[tokio::test]
    async fn test_epoch_change_rebinds_claims() {
        let h = harness();

        let before = h
            .service
            .handle_slot(Slot::new(7, SLOT_DURATION), 0)
            .await
            .unwrap()
            .unwrap();

        let mut next_epoch = certain_epoch(&h.keypair);
        next_epoch.randomness = [0x22; 32];
        h.service.set_epoch_data(next_epoch);

        let after = h
            .service
            .handle_slot(Slot::new(7, SLOT_DURATION), 1)
            .await
            .unwrap()
            .unwrap();

        // New randomness, new transcript, new VRF output for the same slot.
        assert_ne!(
            before.header.digest.pre_runtime().unwrap().vrf_output,
            after.header.digest.pre_runtime().unwrap().vrf_output
        );
    }

    #[tokio::test]
    async fn test_lost_lottery_is_quiet() {
        let h = harness_with(MockExecutor::new(), |keypair| {
            let mut data = certain_epoch(keypair);
            data.threshold = 0;
            data
        });

        let outcome = h
            .service
            .handle_slot(Slot::new(1, SLOT_DURATION), 0)
            .await
            .unwrap();

        assert!(outcome.is_none());
        assert_eq!(h.service.metrics().get_blocks_built(), 0);
        assert_eq!(h.service.metrics().get_build_errors(), 0);
    }

    #[tokio::test]
    async fn test_expired_slot_fails_claimed_build() {
        let h = harness();

        let err = h
            .service
            .handle_slot(Slot::new(1, Duration::ZERO), 0)
            .await
            .unwrap_err();

        assert!(matches!(err, AuthorshipError::SlotExpired { slot: 1 }));
        assert_eq!(h.service.metrics().get_build_errors(), 1);
    }
}
