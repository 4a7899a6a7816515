//! Canonical Encoding
//!
//! Turns a record into the deterministic byte sequence that its leaf digest is
//! computed over. Two logically equal records must encode to identical bytes,
//! otherwise roots stop being reproducible across runs and processes.
//!
//! Plain values encode themselves directly. Serde types opt in through one of
//! the wrapper types ([`Json`], [`SortedJson`], [`Bincode`]) so the chosen
//! wire form is visible at the call site.

use crate::error::EncodingError;
use serde::Serialize;
use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

/// Capability of producing canonical bytes for a record.
///
/// Implementations append to `out` and leave existing contents untouched.
pub trait CanonicalEncode {
    fn encode_canonical(&self, out: &mut Vec<u8>) -> Result<(), EncodingError>;
}

impl CanonicalEncode for str {
    fn encode_canonical(&self, out: &mut Vec<u8>) -> Result<(), EncodingError> {
        out.extend_from_slice(self.as_bytes());
        Ok(())
    }
}

impl CanonicalEncode for String {
    fn encode_canonical(&self, out: &mut Vec<u8>) -> Result<(), EncodingError> {
        self.as_str().encode_canonical(out)
    }
}

impl CanonicalEncode for [u8] {
    fn encode_canonical(&self, out: &mut Vec<u8>) -> Result<(), EncodingError> {
        out.extend_from_slice(self);
        Ok(())
    }
}

impl CanonicalEncode for Vec<u8> {
    fn encode_canonical(&self, out: &mut Vec<u8>) -> Result<(), EncodingError> {
        self.as_slice().encode_canonical(out)
    }
}

impl<const N: usize> CanonicalEncode for [u8; N] {
    fn encode_canonical(&self, out: &mut Vec<u8>) -> Result<(), EncodingError> {
        self.as_slice().encode_canonical(out)
    }
}

impl CanonicalEncode for bool {
    fn encode_canonical(&self, out: &mut Vec<u8>) -> Result<(), EncodingError> {
        out.push(u8::from(*self));
        Ok(())
    }
}

macro_rules! impl_int_encode {
    ($($t:ty),* $(,)?) => {
        $(
            impl CanonicalEncode for $t {
                fn encode_canonical(&self, out: &mut Vec<u8>) -> Result<(), EncodingError> {
                    out.extend_from_slice(&self.to_be_bytes());
                    Ok(())
                }
            }
        )*
    };
}

impl_int_encode!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

macro_rules! impl_float_encode {
    ($($t:ty),* $(,)?) => {
        $(
            impl CanonicalEncode for $t {
                /// NaN has no canonical form and is rejected; `-0.0` encodes as `0.0`.
                fn encode_canonical(&self, out: &mut Vec<u8>) -> Result<(), EncodingError> {
                    if self.is_nan() {
                        return Err(EncodingError::Unsupported(
                            concat!("NaN ", stringify!($t)).to_string(),
                        ));
                    }
                    let value = if *self == 0.0 { 0.0 } else { *self };
                    out.extend_from_slice(&value.to_bits().to_be_bytes());
                    Ok(())
                }
            }
        )*
    };
}

impl_float_encode!(f32, f64);

impl<T: CanonicalEncode + ?Sized> CanonicalEncode for &T {
    fn encode_canonical(&self, out: &mut Vec<u8>) -> Result<(), EncodingError> {
        (**self).encode_canonical(out)
    }
}

impl<T: CanonicalEncode + ?Sized> CanonicalEncode for Box<T> {
    fn encode_canonical(&self, out: &mut Vec<u8>) -> Result<(), EncodingError> {
        (**self).encode_canonical(out)
    }
}

/// Compact JSON in serializer order.
///
/// Struct fields appear in declaration order. Maps appear in iteration order,
/// so `HashMap` fields are not stable; use [`SortedJson`] for those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: Serialize> CanonicalEncode for Json<T> {
    fn encode_canonical(&self, out: &mut Vec<u8>) -> Result<(), EncodingError> {
        serde_json::to_writer(&mut *out, &self.0)?;
        Ok(())
    }
}

/// Compact JSON with the keys of every object sorted, independent of map
/// iteration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedJson<T>(pub T);

impl<T: Serialize> CanonicalEncode for SortedJson<T> {
    fn encode_canonical(&self, out: &mut Vec<u8>) -> Result<(), EncodingError> {
        let value = sort_keys(serde_json::to_value(&self.0)?);
        serde_json::to_writer(&mut *out, &value)?;
        Ok(())
    }
}

// Rebuilds objects with keys inserted in sorted order so the result is
// sorted whether or not serde_json preserves insertion order.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// bincode 1.x default encoding (little-endian, fixed-width integers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bincode<T>(pub T);

impl<T: Serialize> CanonicalEncode for Bincode<T> {
    fn encode_canonical(&self, out: &mut Vec<u8>) -> Result<(), EncodingError> {
        bincode::serialize_into(&mut *out, &self.0)?;
        Ok(())
    }
}

/// UTF-8 bytes of the NFC normalization of a string.
///
/// Composed and decomposed spellings of the same text encode identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfc<S>(pub S);

impl<S: AsRef<str>> CanonicalEncode for Nfc<S> {
    fn encode_canonical(&self, out: &mut Vec<u8>) -> Result<(), EncodingError> {
        let mut utf8 = [0u8; 4];
        for c in self.0.as_ref().nfc() {
            out.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
        }
        Ok(())
    }
}

/// Encode one record into a fresh vector.
pub fn to_canonical_bytes<T: CanonicalEncode + ?Sized>(
    record: &T,
) -> Result<Vec<u8>, EncodingError> {
    let mut out = Vec::new();
    record.encode_canonical(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::{BTreeMap, HashMap};

    #[derive(Serialize)]
    struct Candidate {
        name: String,
        party: String,
        selected: bool,
    }

    #[test]
    fn test_strings_encode_as_utf8() {
        assert_eq!(to_canonical_bytes("apple").unwrap(), b"apple".to_vec());
        assert_eq!(
            to_canonical_bytes(&"héllo".to_string()).unwrap(),
            "héllo".as_bytes().to_vec()
        );
    }

    #[test]
    fn test_integers_are_big_endian_fixed_width() {
        assert_eq!(to_canonical_bytes(&1u32).unwrap(), vec![0, 0, 0, 1]);
        assert_eq!(to_canonical_bytes(&-1i16).unwrap(), vec![0xff, 0xff]);
        assert_eq!(to_canonical_bytes(&true).unwrap(), vec![1]);
    }

    #[test]
    fn test_negative_zero_matches_zero() {
        assert_eq!(
            to_canonical_bytes(&-0.0f64).unwrap(),
            to_canonical_bytes(&0.0f64).unwrap()
        );
    }

    #[test]
    fn test_nan_is_rejected() {
        let err = to_canonical_bytes(&f64::NAN).unwrap_err();
        assert!(matches!(err, EncodingError::Unsupported(_)));
    }

    #[test]
    fn test_json_uses_declaration_order() {
        let c = Candidate {
            name: "Jane".to_string(),
            party: "Independent".to_string(),
            selected: false,
        };
        let bytes = to_canonical_bytes(&Json(&c)).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"name":"Jane","party":"Independent","selected":false}"#
        );
    }

    #[test]
    fn test_sorted_json_is_map_order_independent() {
        let mut a = HashMap::new();
        let mut b = HashMap::new();
        for i in 0..32 {
            a.insert(format!("k{}", i), i);
        }
        for i in (0..32).rev() {
            b.insert(format!("k{}", i), i);
        }
        let bytes_a = to_canonical_bytes(&SortedJson(&a)).unwrap();
        let bytes_b = to_canonical_bytes(&SortedJson(&b)).unwrap();
        assert_eq!(bytes_a, bytes_b);
        assert!(String::from_utf8(bytes_a).unwrap().starts_with(r#"{"k0":0,"k1":1,"k10":10"#));
    }

    #[test]
    fn test_sorted_json_sorts_nested_objects() {
        let value = serde_json::json!({"b": [{"z": 1, "a": 2}], "a": null});
        let bytes = to_canonical_bytes(&SortedJson(value)).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"a":null,"b":[{"a":2,"z":1}]}"#
        );
    }

    #[test]
    fn test_json_rejects_non_string_map_keys() {
        let mut map = BTreeMap::new();
        map.insert((1u8, 2u8), "x");
        let err = to_canonical_bytes(&Json(&map)).unwrap_err();
        assert!(matches!(err, EncodingError::Json(_)));
    }

    #[test]
    fn test_bincode_encodes_struct() {
        let c = Candidate {
            name: "A".to_string(),
            party: "B".to_string(),
            selected: true,
        };
        let bytes = to_canonical_bytes(&Bincode(&c)).unwrap();
        // u64 length prefix + byte for each string, then the bool
        assert_eq!(bytes.len(), 8 + 1 + 8 + 1 + 1);
        assert_eq!(*bytes.last().unwrap(), 1);
    }

    #[test]
    fn test_nfc_unifies_composed_and_decomposed() {
        let composed = "\u{00e9}";
        let decomposed = "e\u{0301}";
        assert_ne!(composed.as_bytes(), decomposed.as_bytes());
        assert_eq!(
            to_canonical_bytes(&Nfc(composed)).unwrap(),
            to_canonical_bytes(&Nfc(decomposed)).unwrap()
        );
    }

    #[test]
    fn test_encoding_appends() {
        let mut out = b"prefix".to_vec();
        "x".encode_canonical(&mut out).unwrap();
        assert_eq!(out, b"prefixx".to_vec());
    }
}
