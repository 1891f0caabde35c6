//! # Slot-Based Block Authoring
//!
//! The authoring engine for Lattice Chain: a VRF slot lottery over a
//! weighted authority set, a time-budgeted block assembly pipeline and the
//! seal protocol proving authorship.
//!
//! ## Architecture
//!
//! Hexagonal. The [`SlotAuthoring`](ports::inbound::SlotAuthoring) inbound
//! port is driven once per slot by an external timer; the outbound ports
//! ([`Executor`](ports::outbound::Executor),
//! [`TransactionPool`](ports::outbound::TransactionPool),
//! [`BlockState`](ports::outbound::BlockState)) are injected at
//! construction. Domain logic under [`domain`] has no I/O of its own.
//!
//! ## Flow
//!
//! 1. A slot opens; [`AuthorshipService`] evaluates the VRF lottery and
//!    records a winning proof, write-once per slot.
//! 2. On a win, the block builder attaches the pre-digest, initializes the
//!    block, applies inherents, drains pool transactions until the slot
//!    budget runs out, finalizes and seals.
//! 3. Replacing epoch data voids all recorded claims.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;

mod error;
mod metrics;
mod service;

pub use error::{AuthorshipError, Result};
pub use metrics::BuildMetrics;
pub use service::{AuthorshipService, ServiceConfig};
