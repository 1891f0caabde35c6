//! Authoring domain logic: epoch parameters, the slot lottery, block
//! assembly and sealing.

mod builder;
mod epoch;
mod inherents;
mod lottery;
mod proof_store;
mod seal;
mod threshold;

pub use builder::BlockBuilder;
pub use epoch::{Authority, EpochData};
pub use inherents::InherentData;
pub use lottery::{make_transcript, run_lottery, verify_slot_claim, AuthorshipProof, VRF_VALUE_CONTEXT};
pub use proof_store::SlotProofStore;
pub use seal::{block_hash, build_seal, verify_seal};
pub use threshold::{calculate_threshold, MAX_THRESHOLD};
