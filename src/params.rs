use std::sync::OnceLock;

use num_bigint::BigUint;
use num_traits::One;

/// BN254 (alt_bn128) G1 parameters: y^2 = x^3 + 3 over F_p.
#[derive(Clone, Debug)]
pub struct CurveParams {
    /// Field prime.
    pub p: BigUint,
    /// Group order.
    pub n: BigUint,
    /// Curve constant.
    pub b: BigUint,
    pub gx: BigUint,
    pub gy: BigUint,
    /// (p + 1) / 4, valid because p = 3 mod 4.
    pub sqrt_exp: BigUint,
}

const FIELD_PRIME: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x97, 0x81, 0x6a, 0x91, 0x68, 0x71, 0xca, 0x8d, 0x3c, 0x20, 0x8c, 0x16, 0xd8, 0x7c, 0xfd, 0x47,
];

const GROUP_ORDER: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

fn build() -> CurveParams {
    let p = BigUint::from_bytes_be(&FIELD_PRIME);
    let n = BigUint::from_bytes_be(&GROUP_ORDER);
    let sqrt_exp = (&p + BigUint::one()) >> 2;
    CurveParams {
        p,
        n,
        b: BigUint::from(3u32),
        gx: BigUint::from(1u32),
        gy: BigUint::from(2u32),
        sqrt_exp,
    }
}

/// Curve parameters, built once and shared by reference.
pub fn curve() -> &'static CurveParams {
    static PARAMS: OnceLock<CurveParams> = OnceLock::new();
    PARAMS.get_or_init(build)
}

/// Field prime P.
pub fn field_prime() -> &'static BigUint {
    &curve().p
}

/// Group order N.
pub fn group_order() -> &'static BigUint {
    &curve().n
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Num;

    #[test]
    fn test_parameters_match_decimal_constants() {
        let p = BigUint::from_str_radix(
            "21888242871839275222246405745257275088696311157297823662689037894645226208583",
            10,
        )
        .unwrap();
        let n = BigUint::from_str_radix(
            "21888242871839275222246405745257275088548364400416034343698204186575808495617",
            10,
        )
        .unwrap();
        assert_eq!(field_prime(), &p);
        assert_eq!(group_order(), &n);
        assert_eq!(&p % 4u32, BigUint::from(3u32));
    }

    #[test]
    fn test_generator_on_curve() {
        let c = curve();
        let lhs = (&c.gy * &c.gy) % &c.p;
        let rhs = (&c.gx * &c.gx * &c.gx + &c.b) % &c.p;
        assert_eq!(lhs, rhs);
    }
}
