use num_bigint::BigUint;
use num_traits::Zero;

use rand::rngs::OsRng;
use rand::TryCryptoRng;

use crate::error::{Error, Result};
use crate::params::{field_prime, group_order};

/// Uniform integer in [0, N): draw ceil(bits(N)/8) bytes, mask the excess
/// high bits and retry until the draw is below N.
fn uniform_below_order<R: TryCryptoRng + ?Sized>(rng: &mut R) -> Result<BigUint> {
    let n = group_order();
    let bits = n.bits() as usize;
    let len = bits.div_ceil(8);
    let excess = len * 8 - bits;
    let mut buf = vec![0u8; len];
    loop {
        rng.try_fill_bytes(&mut buf)
            .map_err(|e| Error::RandomnessFailure(e.to_string()))?;
        buf[0] &= 0xffu8 >> excess;
        let candidate = BigUint::from_bytes_be(&buf);
        if &candidate < n {
            return Ok(candidate);
        }
    }
}

/// Uniform integer in the open interval (0, bound), by rejection sampling
/// over [0, N). Bounds above N therefore still yield values below N.
pub fn random_scalar_below_with<R: TryCryptoRng + ?Sized>(
    rng: &mut R,
    bound: &BigUint,
) -> Result<BigUint> {
    if bound <= &BigUint::from(1u32) {
        return Err(Error::EmptyRange);
    }
    loop {
        let candidate = uniform_below_order(rng)?;
        if !candidate.is_zero() && &candidate < bound {
            return Ok(candidate);
        }
    }
}

/// Same as [`random_scalar_below_with`] using the operating system RNG.
pub fn random_scalar_below(bound: &BigUint) -> Result<BigUint> {
    random_scalar_below_with(&mut OsRng, bound)
}

/// Uniform in (0, N).
pub fn random_n() -> Result<BigUint> {
    random_scalar_below(group_order())
}

/// Uniform in (0, P); see [`random_scalar_below_with`] for the effective range.
pub fn random_p() -> Result<BigUint> {
    random_scalar_below(field_prime())
}

/// Entropy source whose every read fails.
#[cfg(test)]
pub(crate) struct FailingRng;

#[cfg(test)]
impl rand::TryRngCore for FailingRng {
    type Error = std::io::Error;

    fn try_next_u32(&mut self) -> std::result::Result<u32, Self::Error> {
        Err(std::io::Error::other("entropy source unavailable"))
    }

    fn try_next_u64(&mut self) -> std::result::Result<u64, Self::Error> {
        Err(std::io::Error::other("entropy source unavailable"))
    }

    fn try_fill_bytes(&mut self, _dst: &mut [u8]) -> std::result::Result<(), Self::Error> {
        Err(std::io::Error::other("entropy source unavailable"))
    }
}

#[cfg(test)]
impl TryCryptoRng for FailingRng {}
