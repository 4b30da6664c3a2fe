//! Dual-key stealth addresses (IACR 2017/881, section 2.1).
//!
//! Both parties agree on a secret via ECDH and derive, per nonce:
//!
//! ```text
//! spk <- mpk + g^H(secret || nonce)
//! ssk <- msk + H(secret || nonce)
//! ```
//!
//! so A can compute B's stealth public keys and B the matching secrets,
//! without further interaction.

use log::debug;
use num_bigint::BigUint;

use crate::error::{Error, Result};
use crate::group::CurvePoint;
use crate::hash::hash_to_int;
use crate::keygen::{derive_public_key, is_valid_secret};
use crate::params::group_order;
use crate::types::{PrivateStealthAddress, StealthAddress, StealthSession};

/// ECDH: x coordinate of their_public * my_private, as 32 big-endian bytes.
/// The y coordinate is dropped (RFC 5903, section 9).
pub fn derive_shared_secret(my_private: &BigUint, their_public: &CurvePoint) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&their_public.scalar_mul(my_private).encode()[..32]);
    out
}

/// Stealth public key of the other party: mpk + g^H(secret_material).
pub fn stealth_pub_derive(
    their_master_public: &CurvePoint,
    secret_material: &[u8],
) -> Result<CurvePoint> {
    if !their_master_public.is_on_curve() {
        return Err(Error::Decode("master public key is not on the curve".to_string()));
    }
    let x = hash_to_int(secret_material);
    Ok(their_master_public.add(&derive_public_key(&x)))
}

/// Own stealth secret: (msk + H(secret_material)) mod N.
pub fn stealth_priv_derive(my_master_secret: &BigUint, secret_material: &[u8]) -> Result<BigUint> {
    if !is_valid_secret(my_master_secret) {
        return Err(Error::InvalidSecret);
    }
    let x = hash_to_int(secret_material);
    let ssk = (my_master_secret + x) % group_order();
    if !derive_public_key(&ssk).is_on_curve() {
        return Err(Error::InvalidSecret);
    }
    Ok(ssk)
}

/// 32-byte big-endian encoding of a nonce.
pub fn encode_nonce(nonce: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[24..].copy_from_slice(&nonce.to_be_bytes());
    out
}

impl StealthSession {
    /// Derive `address_count` address pairs for nonces
    /// `nonce_offset..nonce_offset + address_count`.
    pub fn derive(
        my_secret: &BigUint,
        their_public: &CurvePoint,
        nonce_offset: u64,
        address_count: usize,
    ) -> Result<StealthSession> {
        if !is_valid_secret(my_secret) {
            return Err(Error::InvalidSecret);
        }
        let shared_secret = derive_shared_secret(my_secret, their_public);

        let mut their_addresses = Vec::with_capacity(address_count);
        let mut my_addresses = Vec::with_capacity(address_count);
        for i in 0..address_count as u64 {
            let nonce = nonce_offset
                .checked_add(i)
                .ok_or_else(|| Error::InvalidInteger("nonce overflows u64".to_string()))?;
            let mut material = Vec::with_capacity(64);
            material.extend_from_slice(&shared_secret);
            material.extend_from_slice(&encode_nonce(nonce));

            let their_stealth_pub = stealth_pub_derive(their_public, &material)?;
            let my_stealth_priv = stealth_priv_derive(my_secret, &material)?;
            let my_stealth_pub = derive_public_key(&my_stealth_priv);

            their_addresses.push(StealthAddress {
                public: their_stealth_pub,
                nonce,
            });
            my_addresses.push(PrivateStealthAddress {
                public: my_stealth_pub,
                nonce,
                private: my_stealth_priv,
            });
        }

        debug!(
            "stealth session derived: {} addresses from nonce {}",
            address_count, nonce_offset
        );
        Ok(StealthSession {
            my_public: derive_public_key(my_secret),
            their_public: their_public.clone(),
            shared_secret: shared_secret.to_vec(),
            their_addresses,
            my_addresses,
        })
    }
}

pub fn derive_session(
    my_secret: &BigUint,
    their_public: &CurvePoint,
    nonce_offset: u64,
    address_count: usize,
) -> Result<StealthSession> {
    StealthSession::derive(my_secret, their_public, nonce_offset, address_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keygen::{generate_keypair, KeyPair};
    use num_traits::Zero;

    fn pair_of_keys() -> (KeyPair, KeyPair) {
        (generate_keypair().unwrap(), generate_keypair().unwrap())
    }

    #[test]
    fn test_shared_secret_symmetry() {
        let (a, b) = pair_of_keys();
        let ab = derive_shared_secret(&a.secret, &b.public);
        let ba = derive_shared_secret(&b.secret, &a.public);
        assert_eq!(ab, ba);
        assert_ne!(ab, [0u8; 32]);
    }

    #[test]
    fn test_stealth_primitives() {
        let (a, b) = pair_of_keys();
        let secret = derive_shared_secret(&a.secret, &b.public);

        // A's view of B, checked against B's own derivation.
        let sp_b = stealth_pub_derive(&b.public, &secret).unwrap();
        let ss_b = stealth_priv_derive(&b.secret, &secret).unwrap();
        assert_eq!(sp_b, derive_public_key(&ss_b));

        let sp_a = stealth_pub_derive(&a.public, &secret).unwrap();
        let ss_a = stealth_priv_derive(&a.secret, &secret).unwrap();
        assert_eq!(sp_a, derive_public_key(&ss_a));
        assert_ne!(sp_a, sp_b);
    }

    #[test]
    fn test_session_cross_match() {
        let (a, b) = pair_of_keys();
        let sess_a = derive_session(&a.secret, &b.public, 0, 2).unwrap();
        let sess_b = derive_session(&b.secret, &a.public, 0, 2).unwrap();

        assert_eq!(sess_a.their_public, b.public);
        assert_eq!(sess_b.their_public, a.public);
        assert_eq!(sess_a.my_public, a.public);
        assert_eq!(sess_a.shared_secret, sess_b.shared_secret);

        for i in 0..2 {
            assert_eq!(sess_a.my_addresses[i].public, sess_b.their_addresses[i].public);
            assert_eq!(sess_b.my_addresses[i].public, sess_a.their_addresses[i].public);
            assert_eq!(
                sess_a.my_addresses[i].public,
                derive_public_key(&sess_a.my_addresses[i].private)
            );
            assert_eq!(sess_a.my_addresses[i].nonce, i as u64);
            assert_eq!(sess_a.their_addresses[i].nonce, i as u64);
        }
        assert_ne!(sess_a.my_addresses[0].public, sess_a.my_addresses[1].public);
    }

    #[test]
    fn test_nonce_offset() {
        let (a, b) = pair_of_keys();
        let full = derive_session(&a.secret, &b.public, 0, 3).unwrap();
        let tail = derive_session(&a.secret, &b.public, 2, 1).unwrap();
        assert_eq!(tail.my_addresses[0], full.my_addresses[2]);
        assert_eq!(tail.their_addresses[0].nonce, 2);

        let empty = derive_session(&a.secret, &b.public, 5, 0).unwrap();
        assert!(empty.my_addresses.is_empty());
        assert!(empty.their_addresses.is_empty());

        assert!(derive_session(&a.secret, &b.public, u64::MAX, 2).is_err());
    }

    #[test]
    fn test_invalid_secret_rejected() {
        let (_, b) = pair_of_keys();
        let n = group_order();
        for sk in [BigUint::zero(), n.clone(), n + 1u32] {
            assert_eq!(stealth_priv_derive(&sk, b"test"), Err(Error::InvalidSecret));
            assert_eq!(derive_session(&sk, &b.public, 0, 1), Err(Error::InvalidSecret));
        }
    }

    #[test]
    fn test_invalid_public_rejected() {
        let (a, _) = pair_of_keys();
        for sk in [BigUint::zero(), group_order().clone()] {
            let pk = derive_public_key(&sk);
            assert!(stealth_pub_derive(&pk, b"test").is_err());
            assert!(derive_session(&a.secret, &pk, 0, 1).is_err());
        }
    }

    #[test]
    fn test_session_vector() {
        let n = group_order();
        let alice = hash_to_int(b"alice") % n;
        let bob = hash_to_int(b"bob") % n;
        let bob_public = derive_public_key(&bob);

        let sess = derive_session(&alice, &bob_public, 0, 2).unwrap();
        assert_eq!(
            hex::encode(&sess.shared_secret),
            "21f9c9def703295b30fcdd1455fac9a63f5703383b36f30d95ce89abd123d45f"
        );
        assert_eq!(
            sess.my_addresses[0].private.to_string(),
            "15665576588086850130201645482182575080018899996470810844688441907141379031210"
        );
        assert_eq!(
            sess.my_addresses[1].private.to_string(),
            "21223133981450529314949202226344791392245688327902437195699551617628961813791"
        );
        let (x, y) = sess.their_addresses[0].public.xy();
        assert_eq!(
            x.to_string(),
            "14794578408835193857034113629007818577284571895886508028426389273603941078264"
        );
        assert_eq!(
            y.to_string(),
            "11390881438769459325878232957615110404174189119749619061628103756859013719815"
        );
    }

    #[test]
    fn test_encode_nonce() {
        let e = encode_nonce(0x0102);
        assert!(e[..30].iter().all(|&b| b == 0));
        assert_eq!(&e[30..], &[1, 2]);
    }
}
