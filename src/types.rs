use std::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::group::CurvePoint;
use crate::keygen::{generate_keys, generate_keys_with, SecretBound};
use crate::params::group_order;

/// Ordered, non-empty list of public keys. Order fixes signer indices and
/// is part of the signature transcript.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RingRepr")]
pub struct Ring {
    pubkeys: Vec<CurvePoint>,
}

#[derive(Deserialize)]
struct RingRepr {
    pubkeys: Vec<CurvePoint>,
}

impl TryFrom<RingRepr> for Ring {
    type Error = Error;

    fn try_from(repr: RingRepr) -> Result<Self> {
        Ring::new(repr.pubkeys)
    }
}

impl Ring {
    pub fn new(pubkeys: Vec<CurvePoint>) -> Result<Self> {
        if pubkeys.is_empty() {
            return Err(Error::EmptyRing);
        }
        Ok(Ring { pubkeys })
    }

    /// Fresh ring of n members, returned with the members' secrets.
    pub fn generate(n: usize) -> Result<(Ring, Vec<BigUint>)> {
        let (pks, sks) = generate_keys(n)?;
        Ok((Ring::new(pks)?, sks))
    }

    pub fn generate_with<R: rand::TryCryptoRng + ?Sized>(
        rng: &mut R,
        n: usize,
        bound: SecretBound,
    ) -> Result<(Ring, Vec<BigUint>)> {
        let (pks, sks) = generate_keys_with(rng, n, bound)?;
        Ok((Ring::new(pks)?, sks))
    }

    pub fn pubkeys(&self) -> &[CurvePoint] {
        &self.pubkeys
    }

    pub fn len(&self) -> usize {
        self.pubkeys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pubkeys.is_empty()
    }

    pub fn index_of(&self, pk: &CurvePoint) -> Option<usize> {
        self.pubkeys.iter().position(|p| p == pk)
    }

    /// Concatenated 64-byte encodings, in ring order.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.pubkeys.iter().flat_map(|p| p.encode()).collect()
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pk in &self.pubkeys {
            let (x, y) = pk.xy();
            writeln!(f, "{{ \"x\": \"{}\", \"y\": \"{}\" }}", x, y)?;
        }
        Ok(())
    }
}

/// Linkable ring signature: key image plus interleaved (c_j, t_j) pairs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingSignature {
    pub tau: CurvePoint,
    #[serde(with = "crate::encoding::biguint_vec")]
    pub ctlist: Vec<BigUint>,
}

impl RingSignature {
    /// Shape checks against a ring of `ring_size` members.
    pub fn check_shape(&self, ring_size: usize) -> Result<()> {
        if self.ctlist.len() != 2 * ring_size {
            return Err(Error::MalformedSignature(format!(
                "expected {} responses, got {}",
                2 * ring_size,
                self.ctlist.len()
            )));
        }
        let n = group_order();
        if let Some(pos) = self.ctlist.iter().position(|v| v >= n) {
            return Err(Error::MalformedSignature(format!(
                "response {} is not reduced mod N",
                pos
            )));
        }
        if !self.tau.is_on_curve() {
            return Err(Error::MalformedSignature("key image is not on the curve".to_string()));
        }
        Ok(())
    }

    /// (c_j, t_j) for ring member j.
    pub fn pair(&self, j: usize) -> Option<(&BigUint, &BigUint)> {
        Some((self.ctlist.get(2 * j)?, self.ctlist.get(2 * j + 1)?))
    }
}

impl fmt::Display for RingSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.tau.xy();
        writeln!(f, "tau: X: {}, Y: {}", x, y)?;
        let items: Vec<String> = self.ctlist.iter().map(|v| v.to_string()).collect();
        writeln!(f, "ctlist: [\n\t{}\n]", items.join(",\n\t"))
    }
}

/// Ring plus signatures over it, as consumed by contract tooling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputData {
    pub pubkeys: Vec<CurvePoint>,
    pub signatures: Vec<RingSignature>,
}

/// Secret key file layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKeys {
    #[serde(with = "crate::encoding::biguint_vec")]
    pub privkeys: Vec<BigUint>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StealthAddress {
    pub public: CurvePoint,
    pub nonce: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateStealthAddress {
    pub public: CurvePoint,
    pub nonce: u64,
    #[serde(with = "crate::encoding::biguint")]
    pub private: BigUint,
}

/// Output of one stealth derivation: `their_addresses[i]` and
/// `my_addresses[i]` share nonce `offset + i`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StealthSession {
    pub my_public: CurvePoint,
    pub their_public: CurvePoint,
    #[serde(with = "crate::encoding::hex_bytes")]
    pub shared_secret: Vec<u8>,
    #[serde(rename = "theirStealthAddresses")]
    pub their_addresses: Vec<StealthAddress>,
    #[serde(rename = "myStealthAddresses")]
    pub my_addresses: Vec<PrivateStealthAddress>,
}
