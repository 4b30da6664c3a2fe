use num_bigint::BigUint;
use num_traits::Zero;
use rand::rngs::OsRng;
use rand::TryCryptoRng;

use crate::error::Result;
use crate::group::CurvePoint;
use crate::params::{field_prime, group_order};
use crate::randutil::random_scalar_below_with;

/// Upper bound handed to the sampler when generating secret keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SecretBound {
    /// Group order N.
    #[default]
    Order,
    /// Field prime P. Kept for older key files; yields the same range since
    /// the sampler draws below N.
    Prime,
}

impl SecretBound {
    fn value(&self) -> &'static BigUint {
        match self {
            SecretBound::Order => group_order(),
            SecretBound::Prime => field_prime(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct KeyPair {
    pub public: CurvePoint,
    pub secret: BigUint,
}

/// 1 <= s < N.
pub fn is_valid_secret(s: &BigUint) -> bool {
    !s.is_zero() && s < group_order()
}

/// g^s.
pub fn derive_public_key(secret: &BigUint) -> CurvePoint {
    CurvePoint::scalar_base_mul(secret)
}

pub fn generate_keypair_with<R: TryCryptoRng + ?Sized>(
    rng: &mut R,
    bound: SecretBound,
) -> Result<KeyPair> {
    let secret = random_scalar_below_with(rng, bound.value())?;
    let public = derive_public_key(&secret);
    Ok(KeyPair { public, secret })
}

pub fn generate_keypair() -> Result<KeyPair> {
    generate_keypair_with(&mut OsRng, SecretBound::Order)
}

/// n fresh key pairs as parallel lists of public keys and secrets.
pub fn generate_keys_with<R: TryCryptoRng + ?Sized>(
    rng: &mut R,
    n: usize,
    bound: SecretBound,
) -> Result<(Vec<CurvePoint>, Vec<BigUint>)> {
    let mut pks = Vec::with_capacity(n);
    let mut sks = Vec::with_capacity(n);
    for _ in 0..n {
        let kp = generate_keypair_with(rng, bound)?;
        pks.push(kp.public);
        sks.push(kp.secret);
    }
    Ok((pks, sks))
}

pub fn generate_keys(n: usize) -> Result<(Vec<CurvePoint>, Vec<BigUint>)> {
    generate_keys_with(&mut OsRng, n, SecretBound::Order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_keypair() {
        let kp = generate_keypair().unwrap();
        assert!(kp.public.is_on_curve());
        assert!(is_valid_secret(&kp.secret));
        assert_eq!(derive_public_key(&kp.secret), kp.public);
    }

    #[test]
    fn test_valid_secret_bounds() {
        let n = group_order();
        assert!(!is_valid_secret(&BigUint::zero()));
        assert!(!is_valid_secret(n));
        assert!(!is_valid_secret(&(n + 1u32)));
        assert!(is_valid_secret(&BigUint::from(1u32)));
        assert!(is_valid_secret(&(n - 1u32)));
    }

    #[test]
    fn test_legacy_prime_bound_stays_below_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let (pks, sks) = generate_keys_with(&mut rng, 4, SecretBound::Prime).unwrap();
        assert_eq!(pks.len(), 4);
        for (pk, sk) in pks.iter().zip(&sks) {
            assert!(is_valid_secret(sk));
            assert_eq!(&derive_public_key(sk), pk);
        }
    }
}
