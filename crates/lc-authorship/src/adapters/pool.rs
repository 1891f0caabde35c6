//! In-memory priority-ordered transaction pool.
//!
//! A single mutex over a deque keeps `pop`/`requeue_front` atomic relative
//! to each other, which the drain loop relies on when it returns an
//! unfitting transaction.

use std::collections::VecDeque;

use parking_lot::Mutex;
use shared_types::ValidTransaction;
use tracing::trace;

use crate::ports::outbound::TransactionPool;

/// Pool ordered by descending validity priority; FIFO among equals.
#[derive(Debug, Default)]
pub struct InMemoryTransactionPool {
    queue: Mutex<VecDeque<ValidTransaction>>,
}

impl InMemoryTransactionPool {
    /// Empty pool.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionPool for InMemoryTransactionPool {
    fn push(&self, tx: ValidTransaction) -> (bool, Option<ValidTransaction>) {
        let mut queue = self.queue.lock();

        // Identical extrinsic bytes replace in place, keeping the newer
        // validity but not changing queue position.
        if let Some(pos) = queue.iter().position(|q| q.extrinsic == tx.extrinsic) {
            let old = std::mem::replace(&mut queue[pos], tx);
            return (true, Some(old));
        }

        let pos = queue
            .iter()
            .position(|q| q.validity.priority < tx.validity.priority)
            .unwrap_or(queue.len());
        trace!(priority = tx.validity.priority, position = pos, "transaction pooled");
        queue.insert(pos, tx);
        (true, None)
    }

    fn pop(&self) -> Option<ValidTransaction> {
        self.queue.lock().pop_front()
    }

    fn peek(&self) -> Option<ValidTransaction> {
        self.queue.lock().front().cloned()
    }

    fn requeue_front(&self, tx: ValidTransaction) {
        self.queue.lock().push_front(tx);
    }

    fn len(&self) -> usize {
        self.queue.lock().len()
    }
}
