//! Textual and JSON forms of big integers.
//!
//! Integers are written as `0x`-prefixed lowercase hex. On input, hex
//! (`0x`/`0X`), decimal strings and plain JSON integers are accepted.

use num_bigint::BigUint;
use num_traits::Num;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// Parse a decimal or `0x`-prefixed hexadecimal integer.
pub fn parse_biguint(s: &str) -> Result<BigUint> {
    let s = s.trim();
    let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (s, 10),
    };
    if digits.is_empty() {
        return Err(Error::InvalidInteger(s.to_string()));
    }
    BigUint::from_str_radix(digits, radix).map_err(|_| Error::InvalidInteger(s.to_string()))
}

pub fn format_biguint(v: &BigUint) -> String {
    format!("0x{:x}", v)
}

/// Parse hex bytes, with or without a `0x` prefix.
pub fn parse_hex_bytes(s: &str) -> Result<Vec<u8>> {
    let s = s.trim();
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    hex::decode(digits).map_err(|e| Error::InvalidInteger(format!("{s}: {e}")))
}

/// JSON strings go through [`parse_biguint`]; bare numbers keep their exact
/// digits (`arbitrary_precision`) and are parsed as decimal.
fn value_to_biguint(value: Value) -> Result<BigUint> {
    match value {
        Value::String(s) => parse_biguint(&s),
        Value::Number(n) => {
            let text = n.to_string();
            BigUint::from_str_radix(&text, 10).map_err(|_| Error::InvalidInteger(text))
        }
        other => Err(Error::InvalidInteger(other.to_string())),
    }
}

/// `#[serde(with = "crate::encoding::biguint")]`
pub mod biguint {
    use super::*;

    pub fn serialize<S: Serializer>(v: &BigUint, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_str(&format_biguint(v))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<BigUint, D::Error> {
        value_to_biguint(Value::deserialize(d)?).map_err(serde::de::Error::custom)
    }
}

/// `#[serde(with = "crate::encoding::biguint_vec")]`
pub mod biguint_vec {
    use super::*;
    use serde::ser::SerializeSeq;

    pub fn serialize<S: Serializer>(v: &[BigUint], s: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(v.len()))?;
        for item in v {
            seq.serialize_element(&format_biguint(item))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> std::result::Result<Vec<BigUint>, D::Error> {
        Vec::<Value>::deserialize(d)?
            .into_iter()
            .map(|v| value_to_biguint(v).map_err(serde::de::Error::custom))
            .collect()
    }
}

/// `#[serde(with = "crate::encoding::hex_bytes")]`
pub mod hex_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(v: &[u8], s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(v))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        parse_hex_bytes(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Wrapper {
        #[serde(with = "biguint")]
        v: BigUint,
        #[serde(with = "biguint_vec")]
        list: Vec<BigUint>,
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(parse_biguint("255").unwrap(), BigUint::from(255u32));
        assert_eq!(parse_biguint("0xff").unwrap(), BigUint::from(255u32));
        assert_eq!(parse_biguint(" 0XFF ").unwrap(), BigUint::from(255u32));
        assert!(parse_biguint("0x").is_err());
        assert!(parse_biguint("").is_err());
        assert!(parse_biguint("12a").is_err());
        assert!(parse_biguint("-1").is_err());
    }

    #[test]
    fn test_large_values_exact() {
        let text = "21888242871839275222246405745257275088548364400416034343698204186575808495617";
        let v = parse_biguint(text).unwrap();
        assert_eq!(v.to_string(), text);
        assert_eq!(parse_biguint(&format_biguint(&v)).unwrap(), v);
    }

    #[test]
    fn test_json_accepts_strings_and_numbers() {
        let w: Wrapper = serde_json::from_str(r#"{"v": 10, "list": ["0x1", "2", 3]}"#).unwrap();
        assert_eq!(w.v, BigUint::from(10u32));
        assert_eq!(
            w.list,
            vec![BigUint::from(1u32), BigUint::from(2u32), BigUint::from(3u32)]
        );

        let out = serde_json::to_string(&w).unwrap();
        assert_eq!(out, r#"{"v":"0xa","list":["0x1","0x2","0x3"]}"#);
    }

    #[test]
    fn test_json_rejects_garbage() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"v": "zz", "list": []}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"v": true, "list": []}"#).is_err());
    }

    #[test]
    fn test_bare_large_numbers_read_exactly() {
        use crate::group::CurvePoint;
        use crate::types::RingSignature;

        let x = "18402258484067100825836416533206638046709953333460439275068607944552700874793";
        let y = "3216486158313018618592493241388793958480998389453172132732084762339402552220";
        let point: CurvePoint =
            serde_json::from_str(&format!(r#"{{"x": {x}, "y": {y}}}"#)).unwrap();
        let (px, py) = point.xy();
        assert_eq!(px.to_string(), x);
        assert_eq!(py.to_string(), y);

        let n_minus_one =
            "21888242871839275222246405745257275088548364400416034343698204186575808495616";
        let json = format!(r#"{{"tau": {{"x": 1, "y": 2}}, "ctlist": [{n_minus_one}, 7]}}"#);
        let sig: RingSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(sig.ctlist[0].to_string(), n_minus_one);
        assert_eq!(sig.ctlist[1], BigUint::from(7u32));
        assert_eq!(sig.tau, CurvePoint::generator());
    }

    #[test]
    fn test_bare_numbers_must_be_non_negative_integers() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"v": -1, "list": []}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"v": 1.5, "list": []}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"v": 0, "list": [-3]}"#).is_err());
    }

    #[test]
    fn test_hex_bytes() {
        assert_eq!(parse_hex_bytes("0x0a0b").unwrap(), vec![10, 11]);
        assert_eq!(parse_hex_bytes("0a0b").unwrap(), vec![10, 11]);
        assert!(parse_hex_bytes("0a0").is_err());
    }
}
