//! Plain affine points over `num-bigint`.
//!
//! Points are stored in affine form; additions and multiplications run in
//! Jacobian coordinates and pay a single field inversion when converting back.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::params::curve;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct G1 {
    x: BigUint,
    y: BigUint,
    infinity: bool,
}

/// (X, Y, Z) with x = X/Z^2, y = Y/Z^3. Z = 0 is the identity.
#[derive(Clone, Debug)]
struct Jacobian {
    x: BigUint,
    y: BigUint,
    z: BigUint,
}

fn fadd(a: &BigUint, b: &BigUint) -> BigUint {
    (a + b) % &curve().p
}

fn fsub(a: &BigUint, b: &BigUint) -> BigUint {
    let p = &curve().p;
    (a + p - b) % p
}

fn fmul(a: &BigUint, b: &BigUint) -> BigUint {
    (a * b) % &curve().p
}

fn finv(a: &BigUint) -> BigUint {
    let p = &curve().p;
    a.modpow(&(p - 2u32), p)
}

impl Jacobian {
    fn identity() -> Self {
        Jacobian {
            x: BigUint::one(),
            y: BigUint::one(),
            z: BigUint::zero(),
        }
    }

    fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    fn from_affine(p: &G1) -> Self {
        if p.infinity {
            return Jacobian::identity();
        }
        Jacobian {
            x: p.x.clone(),
            y: p.y.clone(),
            z: BigUint::one(),
        }
    }

    fn to_affine(&self) -> G1 {
        if self.is_identity() {
            return G1::identity();
        }
        let zinv = finv(&self.z);
        let zinv2 = fmul(&zinv, &zinv);
        let zinv3 = fmul(&zinv2, &zinv);
        G1 {
            x: fmul(&self.x, &zinv2),
            y: fmul(&self.y, &zinv3),
            infinity: false,
        }
    }

    // dbl-2009-l, a = 0
    fn double(&self) -> Self {
        if self.is_identity() || self.y.is_zero() {
            return Jacobian::identity();
        }
        let a = fmul(&self.x, &self.x);
        let b = fmul(&self.y, &self.y);
        let c = fmul(&b, &b);
        let xb = fadd(&self.x, &b);
        let d = fsub(&fsub(&fmul(&xb, &xb), &a), &c);
        let d = fadd(&d, &d);
        let e = fadd(&fadd(&a, &a), &a);
        let f = fmul(&e, &e);
        let x3 = fsub(&f, &fadd(&d, &d));
        let c8 = fmul(&c, &BigUint::from(8u32));
        let y3 = fsub(&fmul(&e, &fsub(&d, &x3)), &c8);
        let yz = fmul(&self.y, &self.z);
        let z3 = fadd(&yz, &yz);
        Jacobian { x: x3, y: y3, z: z3 }
    }

    // madd-2007-bl, second operand affine
    fn add_affine(&self, q: &G1) -> Self {
        if q.infinity {
            return self.clone();
        }
        if self.is_identity() {
            return Jacobian::from_affine(q);
        }
        let z1z1 = fmul(&self.z, &self.z);
        let u2 = fmul(&q.x, &z1z1);
        let s2 = fmul(&fmul(&q.y, &self.z), &z1z1);
        let h = fsub(&u2, &self.x);
        let r = fsub(&s2, &self.y);
        if h.is_zero() {
            if r.is_zero() {
                return self.double();
            }
            return Jacobian::identity();
        }
        let r = fadd(&r, &r);
        let hh = fmul(&h, &h);
        let i = fmul(&hh, &BigUint::from(4u32));
        let j = fmul(&h, &i);
        let v = fmul(&self.x, &i);
        let x3 = fsub(&fsub(&fmul(&r, &r), &j), &fadd(&v, &v));
        let y1j = fmul(&self.y, &j);
        let y3 = fsub(&fmul(&r, &fsub(&v, &x3)), &fadd(&y1j, &y1j));
        let z1h = fadd(&self.z, &h);
        let z3 = fsub(&fsub(&fmul(&z1h, &z1h), &z1z1), &hh);
        Jacobian { x: x3, y: y3, z: z3 }
    }
}

impl G1 {
    pub fn identity() -> Self {
        G1 {
            x: BigUint::zero(),
            y: BigUint::zero(),
            infinity: true,
        }
    }

    pub fn generator() -> Self {
        let c = curve();
        G1 {
            x: c.gx.clone(),
            y: c.gy.clone(),
            infinity: false,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.infinity
    }

    /// Coordinates must already be reduced mod P. (0, 0) is the identity.
    pub fn from_affine(x: &BigUint, y: &BigUint) -> Option<Self> {
        if x.is_zero() && y.is_zero() {
            return Some(G1::identity());
        }
        let c = curve();
        let lhs = fmul(y, y);
        let rhs = fadd(&fmul(&fmul(x, x), x), &c.b);
        if lhs != rhs {
            return None;
        }
        Some(G1 {
            x: x.clone(),
            y: y.clone(),
            infinity: false,
        })
    }

    pub fn affine(&self) -> Option<(BigUint, BigUint)> {
        if self.infinity {
            None
        } else {
            Some((self.x.clone(), self.y.clone()))
        }
    }

    pub fn add(&self, other: &G1) -> G1 {
        Jacobian::from_affine(self).add_affine(other).to_affine()
    }

    /// Left-to-right double-and-add over the bits of `k`.
    pub fn mul(&self, k: &BigUint) -> G1 {
        if self.infinity || k.is_zero() {
            return G1::identity();
        }
        let mut acc = Jacobian::identity();
        for i in (0..k.bits()).rev() {
            acc = acc.double();
            if k.bit(i) {
                acc = acc.add_affine(self);
            }
        }
        acc.to_affine()
    }
}
