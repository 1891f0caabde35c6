//! Outbound-port adapters shipped with this crate.

mod pool;

pub use pool::InMemoryTransactionPool;
