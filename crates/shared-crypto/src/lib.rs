//! # Cryptographic Primitives
//!
//! sr25519 signatures and VRF evaluation (schnorrkel over ristretto255) plus
//! BLAKE3 hashing.
//!
//! The VRF is the load-bearing primitive of slot authoring: identical inputs
//! must yield identical output and proof across nodes, and the proof must be
//! verifiable without the private key.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod errors;
mod hashing;
mod sr25519;

pub use errors::CryptoError;
pub use hashing::{blake3_hash, Blake3Hasher, Hash};
pub use sr25519::{
    Sr25519Keypair, Sr25519PublicKey, Sr25519Signature, VrfOutput, VrfProof, SIGNING_CONTEXT,
};

// Re-exported so callers build VRF transcripts against the same merlin
// version this crate signs with.
pub use merlin::Transcript;
