//! Error types for cryptographic operations.

use thiserror::Error;

/// Errors that can occur in signing, verification or VRF evaluation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Bytes do not form a valid public key.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Bytes do not form a valid signature.
    #[error("invalid signature encoding")]
    InvalidSignature,

    /// Bytes do not form a valid secret seed.
    #[error("invalid secret seed")]
    InvalidSeed,

    /// Signature did not verify for the given message and key.
    #[error("signature verification failed")]
    SignatureVerificationFailed,

    /// VRF proof did not verify for the given transcript and output.
    #[error("VRF proof verification failed")]
    VrfVerificationFailed,
}
