//! Coercion of JSON values to and from their ABI representation
//!
//! Each value is encoded on its own, as a single-element tuple of its declared type, which is the
//! same layout as `abi.encode(value)` in Solidity.

use std::str::FromStr;

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{Address, B256, U256};
use serde_json::Value;

use crate::{Error, LeafType, Result};

/// The ABI type corresponding to a [`LeafType`]
#[must_use]
pub fn sol_type(leaf_type: LeafType) -> DynSolType {
    match leaf_type {
        LeafType::String => DynSolType::String,
        LeafType::Bool => DynSolType::Bool,
        LeafType::Uint8 => DynSolType::Uint(8),
        LeafType::Uint32 => DynSolType::Uint(32),
        LeafType::Uint64 => DynSolType::Uint(64),
        LeafType::Uint256 => DynSolType::Uint(256),
        LeafType::Address => DynSolType::Address,
        LeafType::Bytes32 => DynSolType::FixedBytes(32),
        LeafType::Bytes => DynSolType::Bytes,
    }
}

/// ABI-encode `value` as a single-element tuple of `leaf_type`
///
/// ```rust
/// # use leafcodec::{abi, LeafType};
/// # use serde_json::json;
/// let bytes = abi::encode_value(LeafType::Uint8, &json!(42)).unwrap();
///
/// let mut expected = [0u8; 32];
/// expected[31] = 42;
/// assert_eq!(bytes, expected);
/// ```
pub fn encode_value(leaf_type: LeafType, value: &Value) -> Result<Vec<u8>> {
    let sol = to_sol_value(leaf_type, value)?;
    Ok(DynSolValue::Tuple(vec![sol]).abi_encode_params())
}

/// Decode bytes produced by [`encode_value`] back into a JSON value
///
/// Unsigned integers of up to 32 bits decode to JSON numbers, wider ones decode to decimal
/// strings. Addresses decode to their checksummed form, and byte strings to `0x`-prefixed
/// lowercase hex.
pub fn decode_value(leaf_type: LeafType, bytes: &[u8]) -> Result<Value> {
    let decoded = DynSolType::Tuple(vec![sol_type(leaf_type)])
        .abi_decode_params(bytes)
        .map_err(|e| Error::Decoding {
            leaf_type,
            reason: e.to_string(),
        })?;

    let DynSolValue::Tuple(mut values) = decoded else {
        return Err(decoding(leaf_type, "expected a tuple"));
    };

    match (values.pop(), values.is_empty()) {
        (Some(value), true) => from_sol_value(leaf_type, value),
        _ => Err(decoding(leaf_type, "expected exactly one value")),
    }
}

/// Coerce a JSON value into the ABI value of `leaf_type`
pub fn to_sol_value(leaf_type: LeafType, value: &Value) -> Result<DynSolValue> {
    let err = |reason: &str| Error::encoding(leaf_type, value, reason);

    let sol = match leaf_type {
        LeafType::String => {
            let s = value.as_str().ok_or_else(|| err("expected a string"))?;
            DynSolValue::String(s.to_string())
        }
        LeafType::Bool => match value {
            Value::Bool(b) => DynSolValue::Bool(*b),
            Value::String(s) if s == "true" => DynSolValue::Bool(true),
            Value::String(s) if s == "false" => DynSolValue::Bool(false),
            _ => return Err(err("expected a boolean")),
        },
        LeafType::Uint8 | LeafType::Uint32 | LeafType::Uint64 | LeafType::Uint256 => {
            let bits = leaf_type.uint_bits().unwrap_or(256);
            let n = to_uint(value).ok_or_else(|| err("expected a non-negative integer"))?;

            if n.bit_len() > bits {
                return Err(err(&format!("value does not fit in {bits} bits")));
            }

            DynSolValue::Uint(n, bits)
        }
        LeafType::Address => {
            let s = value.as_str().ok_or_else(|| err("expected an address string"))?;
            DynSolValue::Address(parse_address(s).map_err(|reason| err(&reason))?)
        }
        LeafType::Bytes32 => {
            let bytes = value
                .as_str()
                .and_then(prefixed_hex)
                .ok_or_else(|| err("expected 0x-prefixed hex"))?;

            let word = B256::try_from(bytes.as_slice())
                .map_err(|_| err(&format!("expected 32 bytes, got {}", bytes.len())))?;

            DynSolValue::FixedBytes(word, 32)
        }
        LeafType::Bytes => {
            let bytes = value
                .as_str()
                .and_then(prefixed_hex)
                .ok_or_else(|| err("expected 0x-prefixed hex"))?;

            DynSolValue::Bytes(bytes)
        }
    };

    Ok(sol)
}

/// Convert a decoded ABI value of `leaf_type` into its JSON form
pub fn from_sol_value(leaf_type: LeafType, value: DynSolValue) -> Result<Value> {
    let json = match (leaf_type, value) {
        (LeafType::String, DynSolValue::String(s)) => Value::String(s),
        (LeafType::Bool, DynSolValue::Bool(b)) => Value::Bool(b),
        (LeafType::Uint8 | LeafType::Uint32, DynSolValue::Uint(n, _)) => {
            if n.bit_len() > 32 {
                return Err(decoding(leaf_type, "integer out of range"));
            }
            Value::from(n.as_limbs()[0])
        }
        (LeafType::Uint64 | LeafType::Uint256, DynSolValue::Uint(n, _)) => {
            Value::String(n.to_string())
        }
        (LeafType::Address, DynSolValue::Address(address)) => {
            Value::String(address.to_checksum(None))
        }
        (LeafType::Bytes32, DynSolValue::FixedBytes(word, 32)) => {
            Value::String(format!("0x{}", hex::encode(word)))
        }
        (LeafType::Bytes, DynSolValue::Bytes(bytes)) => {
            Value::String(format!("0x{}", hex::encode(bytes)))
        }
        (_, other) => {
            return Err(decoding(
                leaf_type,
                &format!("unexpected ABI value {other:?}"),
            ))
        }
    };

    Ok(json)
}

fn decoding(leaf_type: LeafType, reason: &str) -> Error {
    Error::Decoding {
        leaf_type,
        reason: reason.to_string(),
    }
}

/// Integers may be JSON numbers, decimal or `0x` hex strings, or the `{"type":"BigNumber"}`
/// objects found in older exports
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_uint(value: &Value) -> Option<U256> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    match value {
        Value::Number(n) => n.as_u64().map(U256::from).or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && (0.0..=MAX_SAFE_INTEGER).contains(f))
                .map(|f| U256::from(f as u64))
        }),
        Value::String(s) => parse_uint(s),
        Value::Object(map) if map.get("type").and_then(Value::as_str) == Some("BigNumber") => {
            map.get("hex").and_then(Value::as_str).and_then(parse_uint)
        }
        _ => None,
    }
}

fn parse_uint(s: &str) -> Option<U256> {
    let (digits, radix) = match s.strip_prefix("0x") {
        Some(digits) => (digits, 16),
        None => (s, 10),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    U256::from_str_radix(digits, u64::from(radix)).ok()
}

fn prefixed_hex(s: &str) -> Option<Vec<u8>> {
    s.strip_prefix("0x").and_then(|digits| hex::decode(digits).ok())
}

/// All-lowercase or all-uppercase addresses are accepted as-is, mixed case must be a valid
/// EIP-55 checksum
fn parse_address(s: &str) -> std::result::Result<Address, String> {
    let digits = s.strip_prefix("0x").unwrap_or(s);

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());

    if has_lower && has_upper {
        Address::parse_checksummed(format!("0x{digits}"), None)
            .map_err(|e| format!("bad address checksum: {e}"))
    } else {
        Address::from_str(digits).map_err(|e| format!("invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    const CHECKSUMMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    fn round_trip(leaf_type: LeafType, value: &Value) -> Value {
        let bytes = encode_value(leaf_type, value).unwrap();
        decode_value(leaf_type, &bytes).unwrap()
    }

    #[test]
    fn string_is_encoded_as_a_dynamic_tuple() {
        let bytes = encode_value(LeafType::String, &json!("hello")).unwrap();

        let expected = concat!(
            "0000000000000000000000000000000000000000000000000000000000000020",
            "0000000000000000000000000000000000000000000000000000000000000005",
            "68656c6c6f000000000000000000000000000000000000000000000000000000",
        );

        assert_eq!(hex::encode(bytes), expected);
    }

    #[test]
    fn small_uints_decode_to_numbers() {
        assert_eq!(round_trip(LeafType::Uint8, &json!(255)), json!(255));
        assert_eq!(round_trip(LeafType::Uint32, &json!("4294967295")), json!(4_294_967_295u64));
    }

    #[test]
    fn wide_uints_decode_to_decimal_strings() {
        assert_eq!(round_trip(LeafType::Uint64, &json!(7)), json!("7"));
        assert_eq!(
            round_trip(LeafType::Uint256, &json!("0xff")),
            json!("255"),
        );
        assert_eq!(
            round_trip(
                LeafType::Uint256,
                &json!({ "type": "BigNumber", "hex": "0x0de0b6b3a7640000" })
            ),
            json!("1000000000000000000"),
        );
    }

    #[test]
    fn integral_floats_are_accepted() {
        assert_eq!(round_trip(LeafType::Uint8, &json!(3.0)), json!(3));
    }

    #[test]
    fn uint_out_of_range_is_an_encoding_error() {
        let result = encode_value(LeafType::Uint8, &json!(256));
        assert!(matches!(result, Err(Error::Encoding { leaf_type: LeafType::Uint8, .. })));

        let result = encode_value(LeafType::Uint64, &json!("18446744073709551616"));
        assert!(matches!(result, Err(Error::Encoding { .. })));
    }

    #[test]
    fn non_numeric_uint_is_an_encoding_error() {
        for value in [json!("abc"), json!(""), json!(-1), json!(1.5), json!(null), json!(true)] {
            let result = encode_value(LeafType::Uint256, &value);
            assert!(matches!(result, Err(Error::Encoding { .. })), "{value} was accepted");
        }
    }

    #[test]
    fn bools() {
        assert_eq!(round_trip(LeafType::Bool, &json!(true)), json!(true));
        assert_eq!(round_trip(LeafType::Bool, &json!("false")), json!(false));
        assert!(encode_value(LeafType::Bool, &json!("yes")).is_err());
        assert!(encode_value(LeafType::Bool, &json!("")).is_err());

        // the text "false" commits the same word as `false`
        assert_eq!(
            encode_value(LeafType::Bool, &json!("false")).unwrap(),
            encode_value(LeafType::Bool, &json!(false)).unwrap(),
        );
    }

    #[test]
    fn addresses_decode_checksummed() {
        let lower = CHECKSUMMED.to_lowercase();
        assert_eq!(round_trip(LeafType::Address, &json!(lower)), json!(CHECKSUMMED));
        assert_eq!(round_trip(LeafType::Address, &json!(CHECKSUMMED)), json!(CHECKSUMMED));
    }

    #[test]
    fn bad_address_checksum_is_rejected() {
        let bad = CHECKSUMMED.replace("aA", "Aa");
        assert!(matches!(
            encode_value(LeafType::Address, &json!(bad)),
            Err(Error::Encoding { .. })
        ));
        assert!(encode_value(LeafType::Address, &json!("0x1234")).is_err());
    }

    #[test]
    fn bytes32_must_be_exactly_32_bytes() {
        let word = format!("0x{}", "ab".repeat(32));
        assert_eq!(round_trip(LeafType::Bytes32, &json!(word)), json!(word));

        assert!(encode_value(LeafType::Bytes32, &json!("0xabcd")).is_err());
        assert!(encode_value(LeafType::Bytes32, &json!("ab".repeat(32))).is_err());
    }

    #[test]
    fn bytes_are_lowercased() {
        assert_eq!(round_trip(LeafType::Bytes, &json!("0xDEADBEEF")), json!("0xdeadbeef"));
        assert_eq!(round_trip(LeafType::Bytes, &json!("0x")), json!("0x"));
        assert!(encode_value(LeafType::Bytes, &json!("0xabc")).is_err());
        assert!(encode_value(LeafType::Bytes, &json!("deadbeef")).is_err());
    }

    #[test]
    fn strings_must_be_strings() {
        assert!(encode_value(LeafType::String, &json!(1)).is_err());
        assert_eq!(round_trip(LeafType::String, &json!("")), json!(""));
    }

    #[test]
    fn garbage_bytes_are_a_decoding_error() {
        let result = decode_value(LeafType::String, &[1, 2, 3]);
        assert!(matches!(result, Err(Error::Decoding { leaf_type: LeafType::String, .. })));
    }
}
