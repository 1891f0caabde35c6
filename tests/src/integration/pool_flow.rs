//! # Pool Interaction Integration
//!
//! Exercises the drain loop's contract with the transaction pool: priority
//! ordering into the body, the exhausted-block requeue, and the
//! invalid-transaction abort that leaves untouched transactions pooled.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use lc_authorship::adapters::InMemoryTransactionPool;
    use lc_authorship::ports::inbound::SlotAuthoring;
    use lc_authorship::ports::outbound::{Executor, TransactionPool};
    use lc_authorship::{AuthorshipService, BuildMetrics, ServiceConfig};
    use shared_crypto::Sr25519Keypair;
    use shared_types::{Extrinsic, Slot, ValidTransaction, Validity};

    use crate::integration::fixtures::{certain_epoch, MockBlockState, MockExecutor};

    const SLOT_DURATION: Duration = Duration::from_secs(5);

    fn tx(bytes: &[u8], priority: u64) -> ValidTransaction {
        ValidTransaction::new(
            Extrinsic::new(bytes.to_vec()),
            Validity {
                priority,
                ..Validity::default()
            },
        )
    }

    fn service_over(
        executor: MockExecutor,
        pool: Arc<InMemoryTransactionPool>,
    ) -> AuthorshipService {
        let keypair = Arc::new(Sr25519Keypair::generate());
        let executor = Arc::new(executor);
        AuthorshipService::new(ServiceConfig {
            keypair: keypair.clone(),
            pool,
            block_state: Arc::new(MockBlockState::new(executor)),
            epoch_data: certain_epoch(&keypair),
            metrics: Arc::new(BuildMetrics::new()),
        })
    }

    #[tokio::test]
    async fn test_pool_drained_by_priority() {
        let pool = Arc::new(InMemoryTransactionPool::new());
        pool.push(tx(&[0xA1], 1));
        pool.push(tx(&[0xA3], 3));
        pool.push(tx(&[0xA2], 2));
        let service = service_over(MockExecutor::new(), pool.clone());

        let block = service
            .handle_slot(Slot::new(1, SLOT_DURATION), 0)
            .await
            .unwrap()
            .unwrap();

        // Inherent first, then pool transactions by descending priority.
        assert_eq!(block.body.len(), 4);
        assert_eq!(block.body.0[1].as_bytes(), &[0xA3]);
        assert_eq!(block.body.0[2].as_bytes(), &[0xA2]);
        assert_eq!(block.body.0[3].as_bytes(), &[0xA1]);
        assert!(pool.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_transaction_aborts_build() {
        let pool = Arc::new(InMemoryTransactionPool::new());
        pool.push(tx(&[0xA1], 3));
        pool.push(tx(&[0xA2], 2));
        pool.push(tx(&[0xA3], 1));
        // First applies, second is rejected as a payment failure.
        let executor = MockExecutor::with_apply_codes(vec![[0, 0], [1, 1]]);
        let service = service_over(executor, pool.clone());

        let err = service
            .handle_slot(Slot::new(1, SLOT_DURATION), 0)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "cannot build extrinsics: error applying extrinsic: Apply error, type: Payment"
        );

        // The offender was dropped; the unattempted transaction is still
        // at the pool front.
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.peek().unwrap().extrinsic.as_bytes(), &[0xA3]);
        assert_eq!(service.metrics().get_build_errors(), 1);
    }

    #[tokio::test]
    async fn test_full_block_requeues_unfitting_transaction() {
        let pool = Arc::new(InMemoryTransactionPool::new());
        pool.push(tx(&[0xA1], 2));
        pool.push(tx(&[0xA2], 1));
        let executor = MockExecutor::with_apply_codes(vec![[0, 0], [2, 0]]);
        let service = service_over(executor, pool.clone());

        let block = service
            .handle_slot(Slot::new(1, SLOT_DURATION), 0)
            .await
            .unwrap()
            .unwrap();

        assert!(block.body.has_extrinsic(&[0xA1]));
        assert!(!block.body.has_extrinsic(&[0xA2]));

        // The unfitting transaction stays valid and leads the next draw.
        assert_eq!(pool.peek().unwrap().extrinsic.as_bytes(), &[0xA2]);
    }

    /// Gossip-ingress path: a transaction is validated by the executor
    /// (tagged with its source) before entering the pool, then drained into
    /// the next block.
    #[tokio::test]
    async fn test_external_submission_is_validated_then_included() {
        use shared_types::TransactionSource;

        let pool = Arc::new(InMemoryTransactionPool::new());
        let executor = Arc::new(MockExecutor::new());

        let raw = vec![0xB1, 0xB2];
        let validity = executor
            .validate_transaction(TransactionSource::External, &raw)
            .await
            .unwrap();
        pool.push(ValidTransaction::new(Extrinsic::new(raw.clone()), validity));

        assert_eq!(executor.validated(), vec![(2u8, raw.clone())]);

        let keypair = Arc::new(Sr25519Keypair::generate());
        let service = AuthorshipService::new(ServiceConfig {
            keypair: keypair.clone(),
            pool,
            block_state: Arc::new(MockBlockState::new(executor)),
            epoch_data: certain_epoch(&keypair),
            metrics: Arc::new(BuildMetrics::new()),
        });

        let block = service
            .handle_slot(Slot::new(1, SLOT_DURATION), 0)
            .await
            .unwrap()
            .unwrap();
        assert!(block.body.has_extrinsic(&raw));
    }

    #[tokio::test]
    async fn test_empty_pool_builds_inherent_only_block() {
        let pool = Arc::new(InMemoryTransactionPool::new());
        let service = service_over(MockExecutor::new(), pool);

        let block = service
            .handle_slot(Slot::new(1, SLOT_DURATION), 0)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(block.body.len(), 1);
        assert_eq!(block.header.digest.len(), 3);
    }
}
