//! The seal protocol: signing and verifying finalized headers.
//!
//! The seal signs the hash of the finalized header, digest included up to
//! but excluding the seal itself. Verification therefore pops the seal,
//! re-hashes, checks the signature and restores the digest.

use shared_crypto::{blake3_hash, CryptoError, Sr25519Keypair, Sr25519PublicKey, Sr25519Signature};
use shared_types::{DigestItem, Header, Seal};

/// The block hash: BLAKE3 over the canonical header encoding.
pub fn block_hash(header: &Header) -> [u8; 32] {
    blake3_hash(&header.encode())
}

/// Sign the header's hash. The header must not already carry a seal.
pub fn build_seal(keypair: &Sr25519Keypair, header: &Header) -> Seal {
    let hash = block_hash(header);
    Seal {
        signature: keypair.sign(&hash).0,
    }
}

/// Check that `header`'s trailing seal is a valid signature by `author` over
/// the header-without-seal hash.
pub fn verify_seal(author: &Sr25519PublicKey, header: &Header) -> Result<(), CryptoError> {
    let mut unsealed = header.clone();
    let seal = match unsealed.digest.logs.pop() {
        Some(DigestItem::Seal(seal)) => seal,
        _ => return Err(CryptoError::InvalidSignature),
    };
    let hash = block_hash(&unsealed);
    author.verify(&hash, &Sr25519Signature(seal.signature))
}
