//! G1 elements backed by `ark-bn254`, with affine extraction.

use ark_bn254::{Fq, G1Affine, G1Projective};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{BigInteger, PrimeField};
use num_bigint::BigUint;
use num_traits::Zero;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct G1(G1Affine);

fn to_fq(v: &BigUint) -> Fq {
    Fq::from_be_bytes_mod_order(&v.to_bytes_be())
}

fn from_fq(v: &Fq) -> BigUint {
    BigUint::from_bytes_be(&v.into_bigint().to_bytes_be())
}

impl G1 {
    pub fn identity() -> Self {
        G1(G1Affine::zero())
    }

    pub fn generator() -> Self {
        G1(G1Affine::generator())
    }

    pub fn is_identity(&self) -> bool {
        self.0.is_zero()
    }

    /// Coordinates must already be reduced mod P. (0, 0) is the identity.
    pub fn from_affine(x: &BigUint, y: &BigUint) -> Option<Self> {
        if x.is_zero() && y.is_zero() {
            return Some(G1::identity());
        }
        let point = G1Affine::new_unchecked(to_fq(x), to_fq(y));
        if !point.is_on_curve() || !point.is_in_correct_subgroup_assuming_on_curve() {
            return None;
        }
        Some(G1(point))
    }

    pub fn affine(&self) -> Option<(BigUint, BigUint)> {
        self.0.xy().map(|(x, y)| (from_fq(x), from_fq(y)))
    }

    pub fn add(&self, other: &G1) -> G1 {
        let mut acc: G1Projective = self.0.into();
        acc += &other.0;
        G1(acc.into_affine())
    }

    pub fn mul(&self, k: &BigUint) -> G1 {
        if k.is_zero() {
            return G1::identity();
        }
        G1(self.0.mul_bigint(k.to_u64_digits()).into_affine())
    }
}
