//! Port definitions (hexagonal architecture).
//!
//! Inbound ports are implemented by this crate and driven by the slot timer.
//! Outbound ports are implemented by collaborators (executor, transaction
//! pool, chain state) and injected at construction.

pub mod inbound;
pub mod outbound;
