//! The VRF slot lottery.
//!
//! Every authority evaluates its VRF over a transcript binding the epoch
//! randomness, the epoch index and the slot number. The claim succeeds when
//! the extracted 128-bit value falls below the authority's weighted
//! threshold. Anyone holding the epoch parameters can verify a claim from
//! the pre-digest alone.

use shared_crypto::{Sr25519Keypair, Transcript, VrfOutput, VrfProof};
use shared_types::{EpochIndex, Hash, PreDigest};
use tracing::trace;

use super::{calculate_threshold, EpochData, MAX_THRESHOLD};

/// Context label under which the uniform claim value is extracted from the
/// VRF output. Fixed for wire compatibility.
pub const VRF_VALUE_CONTEXT: &[u8] = b"substrate-babe-vrf";

const TRANSCRIPT_LABEL: &[u8] = b"BABE";

/// The lottery transcript for `(randomness, slot, epoch)`. Signer and
/// verifier must build it identically, field for field.
pub fn make_transcript(randomness: &Hash, slot: u64, epoch: EpochIndex) -> Transcript {
    let mut transcript = Transcript::new(TRANSCRIPT_LABEL);
    transcript.append_u64(b"slot number", slot);
    transcript.append_u64(b"current epoch", epoch);
    transcript.append_message(b"chain randomness", randomness);
    transcript
}

/// A winning lottery evaluation, held until the slot's block is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorshipProof {
    /// VRF output point.
    pub output: VrfOutput,
    /// VRF proof.
    pub proof: VrfProof,
}

/// Evaluate the lottery for one slot. `None` means the slot was lost.
///
/// A threshold of [`MAX_THRESHOLD`] always claims; a strict `<` against
/// `u128::MAX` would lose one slot in 2^128 for no reason.
pub fn run_lottery(
    slot: u64,
    epoch: EpochIndex,
    epoch_data: &EpochData,
    keypair: &Sr25519Keypair,
) -> Option<AuthorshipProof> {
    let transcript = make_transcript(&epoch_data.randomness, slot, epoch);
    let (output, proof, value) = keypair.vrf_sign(transcript, VRF_VALUE_CONTEXT);

    let claimed = epoch_data.threshold == MAX_THRESHOLD || value < epoch_data.threshold;
    trace!(slot, value, threshold = epoch_data.threshold, claimed, "lottery evaluated");

    claimed.then_some(AuthorshipProof { output, proof })
}

/// Verify another authority's slot claim from its pre-digest.
///
/// Checks that the named authority exists, that the VRF proof verifies
/// against the lottery transcript, and that the extracted value is below the
/// threshold for the claimed authority's own weight.
pub fn verify_slot_claim(pre: &PreDigest, epoch: EpochIndex, epoch_data: &EpochData) -> bool {
    let Some(authority) = epoch_data.authority(pre.authority_index) else {
        return false;
    };

    let transcript = make_transcript(&epoch_data.randomness, pre.slot_number, epoch);
    let value = match authority.key.vrf_verify(
        transcript,
        &VrfOutput(pre.vrf_output),
        &VrfProof(pre.vrf_proof),
        VRF_VALUE_CONTEXT,
    ) {
        Ok(value) => value,
        Err(_) => return false,
    };

    let threshold = calculate_threshold(
        epoch_data.c,
        &epoch_data.authorities,
        pre.authority_index as usize,
    );
    threshold == MAX_THRESHOLD || value < threshold
}
