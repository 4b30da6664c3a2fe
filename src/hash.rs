use num_bigint::BigUint;
use sha2::{Digest, Sha256};

use crate::group::CurvePoint;
use crate::params::group_order;

/// SHA-256 over the concatenation of `parts`.
pub fn sha256(parts: &[&[u8]]) -> [u8; 32] {
    let mut h = Sha256::new();
    for part in parts {
        h.update(part);
    }
    h.finalize().into()
}

/// Interpret a SHA-256 digest of `data` as a big-endian integer (unreduced).
pub fn hash_to_int(data: &[u8]) -> BigUint {
    BigUint::from_bytes_be(&sha256(&[data]))
}

/// How a message is turned into the 32-byte input of hash-to-curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessageDigest {
    /// SHA-256(message).
    #[default]
    Sha256,
    /// First 32 bytes of the message, zero-padded. Bytes past 32 are ignored.
    Truncate,
}

impl MessageDigest {
    pub fn digest(&self, message: &[u8]) -> [u8; 32] {
        match self {
            MessageDigest::Sha256 => sha256(&[message]),
            MessageDigest::Truncate => {
                let mut out = [0u8; 32];
                let take = message.len().min(32);
                out[..take].copy_from_slice(&message[..take]);
                out
            }
        }
    }
}

/// Running Fiat-Shamir accumulator for ring signatures.
///
/// acc_0 = H(enc(hashp)[0..32] || enc(tau)), acc_j+1 = H(acc_j || enc(a_j) || enc(b_j)).
/// Members must be absorbed in ring order.
pub struct Transcript {
    acc: [u8; 32],
}

impl Transcript {
    pub fn new(hashp: &CurvePoint, tau: &CurvePoint) -> Self {
        let hp = hashp.encode();
        let acc = sha256(&[&hp[..32], &tau.encode()]);
        Transcript { acc }
    }

    pub fn absorb(&mut self, a: &CurvePoint, b: &CurvePoint) {
        self.acc = sha256(&[&self.acc, &a.encode(), &b.encode()]);
    }

    /// Final accumulator as an integer mod N.
    pub fn challenge(&self) -> BigUint {
        BigUint::from_bytes_be(&self.acc) % group_order()
    }
}
