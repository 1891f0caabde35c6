//! Weighted claim threshold.
//!
//! An authority with relative weight `theta` and lottery constant `c`
//! (fraction of slots expected to have at least one author) claims a slot
//! with probability `p = 1 - (1 - c)^theta`. The VRF value is uniform in
//! `[0, 2^128)`, so the claim test is `value < p * 2^128`.

use num_bigint::BigUint;
use num_rational::BigRational;
use num_traits::{cast::ToPrimitive, identities::One, Zero};

use super::Authority;

/// Threshold sentinel meaning "every slot claims", used by single-authority
/// test networks. `value < u128::MAX` is not quite certain, so the lottery
/// special-cases this value.
pub const MAX_THRESHOLD: u128 = u128::MAX;

/// Compute the claim threshold for `authorities[authority_index]`.
///
/// `c` is a rational constant in `(0, 1]` expressed as `(numerator,
/// denominator)`. Degenerate inputs fall to a zero threshold (never claims)
/// rather than an error; the caller validated the authority set already.
pub fn calculate_threshold(
    c: (u64, u64),
    authorities: &[Authority],
    authority_index: usize,
) -> u128 {
    let total_weight: u64 = authorities.iter().map(|a| a.weight).sum();
    let own_weight = match authorities.get(authority_index) {
        Some(a) => a.weight,
        None => return 0,
    };
    if own_weight == 0 || total_weight == 0 || c.1 == 0 {
        return 0;
    }

    let c = c.0 as f64 / c.1 as f64;
    let theta = own_weight as f64 / total_weight as f64;

    // p = 1 - (1 - c)^theta, carried as an exact rational from here on so
    // the 2^128 scaling does not lose low bits.
    let p = match BigRational::from_float(1f64 - (1f64 - c).powf(theta)) {
        Some(p) if !p.is_zero() => p,
        _ => return 0,
    };

    let numer = p.numer().to_biguint().unwrap_or_default();
    let denom = p.denom().to_biguint().unwrap_or_default();
    if denom.is_zero() {
        return 0;
    }

    let scaled = (BigUint::one() << 128u32) * numer / denom;
    scaled.to_u128().unwrap_or(MAX_THRESHOLD)
}
