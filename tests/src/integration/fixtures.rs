//! Shared mocks for authoring integration tests.
//!
//! [`MockExecutor`] models the executor contract closely enough for
//! end-to-end assertions: it remembers the provisional header from
//! `initialize_block`, records every applied extrinsic, serves scripted
//! apply codes for pool transactions, and finalizes a header that carries
//! the pre-digest plus one consensus item.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use lc_authorship::domain::{Authority, EpochData, InherentData, MAX_THRESHOLD};
use lc_authorship::ports::outbound::{
    BlockState, BlockStateError, Executor, ExecutorError, RuntimeVersion,
};
use shared_crypto::{blake3_hash, Sr25519Keypair};
use shared_types::{DigestItem, Hash, Header, TransactionSource, Validity};

#[derive(Default)]
struct ExecutorState {
    open_header: Option<Header>,
    applied: Vec<Vec<u8>>,
    apply_codes: VecDeque<[u8; 2]>,
    validated: Vec<(u8, Vec<u8>)>,
}

/// Scriptable in-memory executor.
#[derive(Default)]
pub struct MockExecutor {
    state: Mutex<ExecutorState>,
}

impl MockExecutor {
    /// Executor applying every extrinsic cleanly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executor returning `codes` in order for pool transactions. Inherents
    /// always apply cleanly; once the script runs out, `[0, 0]` is assumed.
    pub fn with_apply_codes(codes: Vec<[u8; 2]>) -> Self {
        Self {
            state: Mutex::new(ExecutorState {
                apply_codes: codes.into(),
                ..ExecutorState::default()
            }),
        }
    }

    /// Every extrinsic applied so far, in application order.
    pub fn applied(&self) -> Vec<Vec<u8>> {
        self.state.lock().applied.clone()
    }

    /// `(source tag byte, extrinsic)` pairs seen by `validate_transaction`.
    pub fn validated(&self) -> Vec<(u8, Vec<u8>)> {
        self.state.lock().validated.clone()
    }
}

#[async_trait]
impl Executor for MockExecutor {
    async fn initialize_block(&self, header: &Header) -> Result<(), ExecutorError> {
        let mut state = self.state.lock();
        if state.open_header.is_some() {
            return Err(ExecutorError::new("block already open"));
        }
        state.open_header = Some(header.clone());
        state.applied.clear();
        Ok(())
    }

    async fn inherent_extrinsics(
        &self,
        data: &InherentData,
    ) -> Result<Vec<Vec<u8>>, ExecutorError> {
        Ok(vec![data.encode().to_vec()])
    }

    async fn apply_extrinsic(&self, extrinsic: &[u8]) -> Result<[u8; 2], ExecutorError> {
        let mut state = self.state.lock();
        if state.open_header.is_none() {
            return Err(ExecutorError::new("no open block"));
        }
        // 16-byte extrinsics are this mock's inherents.
        let code = if extrinsic.len() == 16 {
            [0, 0]
        } else {
            state.apply_codes.pop_front().unwrap_or([0, 0])
        };
        if code[0] == 0 {
            state.applied.push(extrinsic.to_vec());
        }
        Ok(code)
    }

    async fn finalize_block(&self) -> Result<Header, ExecutorError> {
        let mut state = self.state.lock();
        let mut header = state
            .open_header
            .take()
            .ok_or_else(|| ExecutorError::new("no open block"))?;

        let mut concat = Vec::new();
        for ext in &state.applied {
            concat.extend_from_slice(ext);
        }
        header.extrinsics_root = blake3_hash(&concat);
        header.state_root = blake3_hash(&header.parent_hash);
        header.digest.push(DigestItem::Consensus(vec![0xC0]));
        Ok(header)
    }

    async fn validate_transaction(
        &self,
        source: TransactionSource,
        extrinsic: &[u8],
    ) -> Result<Validity, ExecutorError> {
        self.state
            .lock()
            .validated
            .push((source.tag_byte(), extrinsic.to_vec()));
        Ok(Validity {
            propagate: true,
            ..Validity::default()
        })
    }

    async fn metadata(&self) -> Result<Vec<u8>, ExecutorError> {
        Ok(b"mock-metadata".to_vec())
    }

    fn version(&self) -> RuntimeVersion {
        RuntimeVersion {
            spec_version: 1,
            transaction_version: 1,
        }
    }
}

/// Chain state serving a fixed best header and one shared [`MockExecutor`].
pub struct MockBlockState {
    best: Mutex<Header>,
    executor: Arc<MockExecutor>,
    stored: Mutex<Vec<Hash>>,
}

impl MockBlockState {
    /// Genesis-rooted chain state over `executor`.
    pub fn new(executor: Arc<MockExecutor>) -> Self {
        Self {
            best: Mutex::new(Header::default()),
            executor,
            stored: Mutex::new(Vec::new()),
        }
    }

    /// Advance the best header, as an import pipeline would.
    pub fn set_best(&self, header: Header) {
        *self.best.lock() = header;
    }

    /// Hashes passed to `store_runtime`, in order.
    pub fn stored_runtimes(&self) -> Vec<Hash> {
        self.stored.lock().clone()
    }
}

#[async_trait]
impl BlockState for MockBlockState {
    async fn best_block_header(&self) -> Result<Header, BlockStateError> {
        Ok(self.best.lock().clone())
    }

    fn genesis_hash(&self) -> Hash {
        blake3_hash(&Header::default().encode())
    }

    async fn get_runtime(
        &self,
        _parent: Option<Hash>,
    ) -> Result<Arc<dyn Executor>, BlockStateError> {
        Ok(self.executor.clone())
    }

    async fn store_runtime(
        &self,
        block_hash: Hash,
        _runtime: Arc<dyn Executor>,
    ) -> Result<(), BlockStateError> {
        self.stored.lock().push(block_hash);
        Ok(())
    }
}

/// Single-authority epoch in which every slot is claimed.
pub fn certain_epoch(keypair: &Sr25519Keypair) -> EpochData {
    EpochData {
        authorities: vec![Authority {
            key: keypair.public_key(),
            weight: 1,
        }],
        authority_index: 0,
        c: (1, 1),
        threshold: MAX_THRESHOLD,
        randomness: [0x11; 32],
    }
}
