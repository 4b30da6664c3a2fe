use log::debug;
use num_bigint::BigUint;
use num_traits::Zero;
use rand::rngs::OsRng;
use rand::TryCryptoRng;

use crate::error::{Error, Result};
use crate::group::CurvePoint;
use crate::hash::{MessageDigest, Transcript};
use crate::keygen::derive_public_key;
use crate::params::group_order;
use crate::randutil::random_scalar_below_with;
use crate::types::{Ring, RingSignature};

/// g^t * pk^c
fn commit_key(pk: &CurvePoint, t: &BigUint, c: &BigUint) -> CurvePoint {
    CurvePoint::scalar_base_mul(t).add(&pk.scalar_mul(c))
}

/// hashp^t * tau^c
fn commit_image(hashp: &CurvePoint, tau: &CurvePoint, t: &BigUint, c: &BigUint) -> CurvePoint {
    hashp.scalar_mul(t).add(&tau.scalar_mul(c))
}

/// (a - b) mod N for a, b already reduced.
fn sub_mod(a: &BigUint, b: &BigUint, n: &BigUint) -> BigUint {
    ((a + n) - b) % n
}

/// Signs and verifies under a fixed message digest policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct RingSigner {
    digest: MessageDigest,
}

impl RingSigner {
    pub fn new(digest: MessageDigest) -> Self {
        RingSigner { digest }
    }

    pub fn digest(&self) -> MessageDigest {
        self.digest
    }

    fn hash_point(&self, message: &[u8]) -> CurvePoint {
        CurvePoint::hash_to_curve(&self.digest.digest(message))
    }

    /// Sign `message` as ring member `signer`.
    ///
    /// 1. hashp = H(digest(m)), tau = hashp^x
    /// 2. for every j != signer pick (c_j, t_j) and simulate
    ///    a_j = g^t_j * pk_j^c_j, b_j = hashp^t_j * tau^c_j
    /// 3. for the signer pick r, a = g^r, b = hashp^r
    /// 4. fold every (a_j, b_j) into the transcript in ring order -> e
    /// 5. c_signer = e - sum(c_j), t_signer = r - c_signer * x (mod N)
    pub fn sign_with<R: TryCryptoRng + ?Sized>(
        &self,
        rng: &mut R,
        ring: &Ring,
        message: &[u8],
        signer: usize,
        private_key: &BigUint,
    ) -> Result<RingSignature> {
        let n = group_order();
        let size = ring.len();
        if size == 0 {
            return Err(Error::EmptyRing);
        }
        if signer >= size {
            return Err(Error::SignerOutOfRange { index: signer, size });
        }
        let sk = private_key % n;
        if sk.is_zero() {
            return Err(Error::InvalidSecret);
        }
        if derive_public_key(&sk) != ring.pubkeys()[signer] {
            return Err(Error::KeyMismatch(signer));
        }

        let hashp = self.hash_point(message);
        let tau = hashp.scalar_mul(&sk);

        let mut transcript = Transcript::new(&hashp, &tau);
        let mut ctlist = vec![BigUint::zero(); 2 * size];
        let mut c_sum = BigUint::zero();
        let mut r = BigUint::zero();

        for (j, pk) in ring.pubkeys().iter().enumerate() {
            let (a, b) = if j == signer {
                r = random_scalar_below_with(rng, n)?;
                (CurvePoint::scalar_base_mul(&r), hashp.scalar_mul(&r))
            } else {
                let c = random_scalar_below_with(rng, n)?;
                let t = random_scalar_below_with(rng, n)?;
                let a = commit_key(pk, &t, &c);
                let b = commit_image(&hashp, &tau, &t, &c);
                c_sum += &c;
                ctlist[2 * j] = c;
                ctlist[2 * j + 1] = t;
                (a, b)
            };
            transcript.absorb(&a, &b);
        }

        let e = transcript.challenge();
        let c = sub_mod(&e, &(c_sum % n), n);
        let t = sub_mod(&r, &((&c * &sk) % n), n);
        ctlist[2 * signer] = c;
        ctlist[2 * signer + 1] = t;

        debug!("ring signature produced for ring of size {}", size);
        Ok(RingSignature { tau, ctlist })
    }

    pub fn sign(
        &self,
        ring: &Ring,
        message: &[u8],
        signer: usize,
        private_key: &BigUint,
    ) -> Result<RingSignature> {
        self.sign_with(&mut OsRng, ring, message, signer, private_key)
    }

    /// Sign with every secret, each at the ring position of its public key.
    pub fn sign_all(
        &self,
        ring: &Ring,
        private_keys: &[BigUint],
        message: &[u8],
    ) -> Result<Vec<RingSignature>> {
        private_keys
            .iter()
            .map(|sk| {
                let index = ring
                    .index_of(&derive_public_key(sk))
                    .ok_or(Error::KeyNotInRing)?;
                self.sign(ring, message, index, sk)
            })
            .collect()
    }

    /// Accept iff sum(c_j) == H(transcript) mod N. Never fails loudly: any
    /// malformed input yields `false`.
    pub fn verify(&self, ring: &Ring, message: &[u8], signature: &RingSignature) -> bool {
        let size = ring.len();
        if size == 0 {
            debug!("verify: empty ring");
            return false;
        }
        if let Err(e) = signature.check_shape(size) {
            debug!("verify: {}", e);
            return false;
        }

        let n = group_order();
        let hashp = self.hash_point(message);
        let tau = &signature.tau;

        let mut transcript = Transcript::new(&hashp, tau);
        let mut c_sum = BigUint::zero();

        for (j, pk) in ring.pubkeys().iter().enumerate() {
            let Some((c, t)) = signature.pair(j) else {
                return false;
            };
            let a = commit_key(pk, t, c);
            let b = commit_image(&hashp, tau, t, c);
            transcript.absorb(&a, &b);
            c_sum += c;
        }

        let ok = c_sum % n == transcript.challenge();
        debug!("verify: ring of size {}, result {}", size, ok);
        ok
    }
}

/// Sign with the default policy and the operating system RNG.
pub fn sign(
    ring: &Ring,
    message: &[u8],
    signer: usize,
    private_key: &BigUint,
) -> Result<RingSignature> {
    RingSigner::default().sign(ring, message, signer, private_key)
}

/// Verify with the default policy.
pub fn verify(ring: &Ring, message: &[u8], signature: &RingSignature) -> bool {
    RingSigner::default().verify(ring, message, signature)
}

pub fn sign_all(
    ring: &Ring,
    private_keys: &[BigUint],
    message: &[u8],
) -> Result<Vec<RingSignature>> {
    RingSigner::default().sign_all(ring, private_keys, message)
}

/// Two signatures come from the same key iff their key images match.
pub fn is_linked(a: &RingSignature, b: &RingSignature) -> bool {
    a.tau == b.tau
}
