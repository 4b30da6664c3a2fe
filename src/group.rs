use std::fmt;
use std::ops::{Add, Mul};

use log::trace;
use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::backend::G1;
use crate::error::{Error, Result};
use crate::hash::sha256;
use crate::params::curve;

/// Integers used as exponents, normalized mod N before use.
pub type Scalar = BigUint;

/// A point of the BN254 G1 group, or the identity.
///
/// Immutable; every operation returns a new value. Two points are equal iff
/// their 64-byte encodings are equal.
#[derive(Clone, Debug)]
pub struct CurvePoint {
    inner: G1,
}

fn to_be_32(v: &BigUint) -> [u8; 32] {
    let bytes = v.to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}

impl CurvePoint {
    pub fn identity() -> Self {
        CurvePoint { inner: G1::identity() }
    }

    pub fn generator() -> Self {
        CurvePoint { inner: G1::generator() }
    }

    pub fn is_identity(&self) -> bool {
        self.inner.is_identity()
    }

    pub fn add(&self, other: &CurvePoint) -> CurvePoint {
        CurvePoint { inner: self.inner.add(&other.inner) }
    }

    /// self * k. Any non-negative k is accepted.
    pub fn scalar_mul(&self, k: &BigUint) -> CurvePoint {
        CurvePoint { inner: self.inner.mul(k) }
    }

    /// g * k.
    pub fn scalar_base_mul(k: &BigUint) -> CurvePoint {
        CurvePoint::generator().scalar_mul(k)
    }

    /// Affine coordinates; the identity is (0, 0).
    pub fn xy(&self) -> (BigUint, BigUint) {
        self.inner.affine().unwrap_or_default()
    }

    /// Big-endian x || y, each zero-padded to 32 bytes.
    pub fn encode(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        if let Some((x, y)) = self.inner.affine() {
            out[..32].copy_from_slice(&to_be_32(&x));
            out[32..].copy_from_slice(&to_be_32(&y));
        }
        out
    }

    /// Inverse of [`CurvePoint::encode`]. Coordinates must be reduced and
    /// satisfy the curve equation; 64 zero bytes decode to the identity.
    pub fn decode(bytes: &[u8]) -> Result<CurvePoint> {
        if bytes.len() != 64 {
            return Err(Error::Decode(format!("expected 64 bytes, got {}", bytes.len())));
        }
        let p = &curve().p;
        let x = BigUint::from_bytes_be(&bytes[..32]);
        let y = BigUint::from_bytes_be(&bytes[32..]);
        if &x >= p || &y >= p {
            return Err(Error::Decode("coordinate exceeds field prime".to_string()));
        }
        G1::from_affine(&x, &y)
            .map(|inner| CurvePoint { inner })
            .ok_or_else(|| Error::Decode("point is not on the curve".to_string()))
    }

    /// Reduce x and y mod P, then decode.
    pub fn from_xy(x: &BigUint, y: &BigUint) -> Result<CurvePoint> {
        let p = &curve().p;
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(&to_be_32(&(x % p)));
        buf[32..].copy_from_slice(&to_be_32(&(y % p)));
        CurvePoint::decode(&buf)
    }

    /// y^2 = x^3 + B. The identity is not on the curve.
    pub fn is_on_curve(&self) -> bool {
        let Some((x, y)) = self.inner.affine() else {
            return false;
        };
        let c = curve();
        (&y * &y) % &c.p == (&x * &x * &x + &c.b) % &c.p
    }

    /// Try-and-increment map from a digest to a point.
    ///
    /// x starts at digest mod N; each candidate whose x^3 + B has no square
    /// root mod P is skipped by incrementing x. Deterministic and expected to
    /// finish within a couple of iterations.
    pub fn hash_to_curve(digest: &[u8; 32]) -> CurvePoint {
        let c = curve();
        let mut x = BigUint::from_bytes_be(digest) % &c.n;
        let mut attempts = 0u32;
        loop {
            let t = (&x * &x * &x + &c.b) % &c.p;
            let y = t.modpow(&c.sqrt_exp, &c.p);
            if (&y * &y) % &c.p == t {
                if let Ok(point) = CurvePoint::from_xy(&x, &y) {
                    return point;
                }
            }
            attempts += 1;
            trace!("hash_to_curve: candidate rejected, attempt {}", attempts);
            x += 1u32;
        }
    }

    /// hash_to_curve(SHA-256(data)).
    pub fn hash_string_to_curve(data: &[u8]) -> CurvePoint {
        CurvePoint::hash_to_curve(&sha256(&[data]))
    }
}

impl PartialEq for CurvePoint {
    fn eq(&self, other: &Self) -> bool {
        self.encode() == other.encode()
    }
}

impl Eq for CurvePoint {}

impl<'a> Add<&'a CurvePoint> for &'a CurvePoint {
    type Output = CurvePoint;

    fn add(self, rhs: &'a CurvePoint) -> CurvePoint {
        CurvePoint::add(self, rhs)
    }
}

impl<'a> Mul<&'a BigUint> for &'a CurvePoint {
    type Output = CurvePoint;

    fn mul(self, rhs: &'a BigUint) -> CurvePoint {
        self.scalar_mul(rhs)
    }
}

impl fmt::Display for CurvePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.xy();
        write!(f, "CurvePoint({}, {})", x, y)
    }
}

#[derive(Serialize, Deserialize)]
struct PointRepr {
    #[serde(with = "crate::encoding::biguint")]
    x: BigUint,
    #[serde(with = "crate::encoding::biguint")]
    y: BigUint,
}

impl Serialize for CurvePoint {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        let (x, y) = self.xy();
        PointRepr { x, y }.serialize(s)
    }
}

impl<'de> Deserialize<'de> for CurvePoint {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let repr = PointRepr::deserialize(d)?;
        CurvePoint::from_xy(&repr.x, &repr.y).map_err(serde::de::Error::custom)
    }
}
