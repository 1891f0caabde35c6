//! # sr25519 Signatures and VRF
//!
//! Schnorr signatures over ristretto255 with a built-in verifiable random
//! function. One authority keypair covers both capabilities: plain signing
//! for seals and VRF evaluation for the slot lottery.
//!
//! VRF outputs are turned into uniform 128-bit values with
//! [`make_bytes`](schnorrkel::vrf::VRFInOut::make_bytes) under a
//! caller-supplied context label, so signer and verifier extract the same
//! value from the same (transcript, output) pair.

use crate::CryptoError;
use merlin::Transcript;
use schnorrkel::{
    vrf::{VRFOutput, VRFProof},
    ExpansionMode, Keypair, MiniSecretKey, PublicKey, Signature,
};

/// Domain separator for plain sr25519 signatures.
pub const SIGNING_CONTEXT: &[u8] = b"substrate";

/// sr25519 public key (32 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Sr25519PublicKey([u8; 32]);

impl Sr25519PublicKey {
    /// Create from bytes, validating the curve point.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        PublicKey::from_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    fn inner(&self) -> Result<PublicKey, CryptoError> {
        PublicKey::from_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Verify a plain signature over `message`.
    pub fn verify(
        &self,
        message: &[u8],
        signature: &Sr25519Signature,
    ) -> Result<(), CryptoError> {
        let public = self.inner()?;
        let signature =
            Signature::from_bytes(&signature.0).map_err(|_| CryptoError::InvalidSignature)?;
        let ctx = schnorrkel::signing_context(SIGNING_CONTEXT);
        public
            .verify(ctx.bytes(message), &signature)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }

    /// Verify a VRF (output, proof) pair against `transcript` and return the
    /// uniform 128-bit value extracted under `value_context`.
    pub fn vrf_verify(
        &self,
        transcript: Transcript,
        output: &VrfOutput,
        proof: &VrfProof,
        value_context: &[u8],
    ) -> Result<u128, CryptoError> {
        let public = self.inner()?;
        let output = VRFOutput::from_bytes(&output.0).map_err(|_| CryptoError::InvalidSignature)?;
        let proof = VRFProof::from_bytes(&proof.0).map_err(|_| CryptoError::InvalidSignature)?;
        let (inout, _) = public
            .vrf_verify(transcript, &output, &proof)
            .map_err(|_| CryptoError::VrfVerificationFailed)?;
        Ok(u128::from_le_bytes(
            inout.make_bytes::<[u8; 16]>(value_context),
        ))
    }
}

/// sr25519 signature (64 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sr25519Signature(pub [u8; 64]);

impl Sr25519Signature {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

/// VRF output point (32 bytes, compressed).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VrfOutput(pub [u8; 32]);

/// VRF proof (64 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VrfProof(pub [u8; 64]);

/// sr25519 keypair.
pub struct Sr25519Keypair {
    inner: Keypair,
}

impl Sr25519Keypair {
    /// Generate a random keypair.
    pub fn generate() -> Self {
        Self {
            inner: Keypair::generate(),
        }
    }

    /// Derive a keypair from a 32-byte secret seed.
    pub fn from_seed(seed: [u8; 32]) -> Result<Self, CryptoError> {
        let mini = MiniSecretKey::from_bytes(&seed).map_err(|_| CryptoError::InvalidSeed)?;
        Ok(Self {
            inner: mini.expand_to_keypair(ExpansionMode::Ed25519),
        })
    }

    /// Get the public key.
    pub fn public_key(&self) -> Sr25519PublicKey {
        Sr25519PublicKey(self.inner.public.to_bytes())
    }

    /// Sign a message under [`SIGNING_CONTEXT`].
    pub fn sign(&self, message: &[u8]) -> Sr25519Signature {
        let ctx = schnorrkel::signing_context(SIGNING_CONTEXT);
        Sr25519Signature(self.inner.sign(ctx.bytes(message)).to_bytes())
    }

    /// Evaluate the VRF over `transcript`.
    ///
    /// Returns the output point, the proof, and the uniform 128-bit value
    /// extracted under `value_context`. Deterministic: identical transcripts
    /// yield identical results.
    pub fn vrf_sign(
        &self,
        transcript: Transcript,
        value_context: &[u8],
    ) -> (VrfOutput, VrfProof, u128) {
        let (inout, proof, _) = self.inner.vrf_sign(transcript);
        let value = u128::from_le_bytes(inout.make_bytes::<[u8; 16]>(value_context));
        (
            VrfOutput(inout.to_output().to_bytes()),
            VrfProof(proof.to_bytes()),
            value,
        )
    }
}
