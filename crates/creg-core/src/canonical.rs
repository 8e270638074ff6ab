//! # Canonical Serialization
//!
//! [`CanonicalBytes`] is the only input accepted by the digest functions.
//! Certificate ids, event digests and registry state digests are all
//! computed over these bytes, so two hosts holding the same records always
//! derive the same identifiers.
//!
//! ## Rules
//!
//! 1. Floats are rejected; every amount in the registry is an integer.
//! 2. Strings pass through unchanged. Timestamps reach this layer already in
//!    their single `YYYY-MM-DDTHH:MM:SSZ` form via the `Timestamp` serializer.
//! 3. Output is JCS (RFC 8785): sorted keys, compact separators.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced by canonical JSON serialization.
///
/// The inner buffer is private; construct through [`CanonicalBytes::new()`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize any serializable value.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = reject_floats(serde_json::to_value(obj)?)?;
        Ok(Self(serde_jcs::to_string(&value)?.into_bytes()))
    }

    /// Borrow the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume and return the inner buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

fn reject_floats(value: Value) -> Result<Value, CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(value),
        Value::Number(ref n) => {
            if n.is_f64() {
                return Err(CanonicalizationError::FloatRejected(
                    n.as_f64().unwrap_or(f64::NAN),
                ));
            }
            Ok(value)
        }
        Value::Array(items) => items
            .into_iter()
            .map(reject_floats)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| Ok((k, reject_floats(v)?)))
            .collect::<Result<serde_json::Map<_, _>, CanonicalizationError>>()
            .map(Value::Object),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_are_sorted_and_compact() {
        let cb = CanonicalBytes::new(&json!({"student": "s", "course_id": 1, "a": null})).unwrap();
        assert_eq!(cb.as_bytes(), br#"{"a":null,"course_id":1,"student":"s"}"#);
    }

    #[test]
    fn nested_objects_are_sorted() {
        let cb = CanonicalBytes::new(&json!({"z": {"y": 1, "b": [2, 1]}})).unwrap();
        assert_eq!(cb.as_bytes(), br#"{"z":{"b":[2,1],"y":1}}"#);
    }

    #[test]
    fn floats_are_rejected() {
        let err = CanonicalBytes::new(&json!({"price": 99.5})).unwrap_err();
        assert!(matches!(err, CanonicalizationError::FloatRejected(_)));
    }

    #[test]
    fn datetime_shaped_strings_are_not_rewritten() {
        let offset = CanonicalBytes::new(&json!({"name": "2026-03-01T17:00:00+05:00"})).unwrap();
        let utc = CanonicalBytes::new(&json!({"name": "2026-03-01T12:00:00.999Z"})).unwrap();
        assert_eq!(offset.as_bytes(), br#"{"name":"2026-03-01T17:00:00+05:00"}"#);
        assert_ne!(offset, utc);
    }

    #[test]
    fn timestamps_serialize_in_utc_seconds_form() {
        let ts = crate::Timestamp::from_epoch_secs(1_772_366_400).unwrap();
        let cb = CanonicalBytes::new(&json!({"at": ts})).unwrap();
        assert_eq!(cb.as_bytes(), br#"{"at":"2026-03-01T12:00:00Z"}"#);
    }

    #[test]
    fn plain_strings_pass_through() {
        let cb = CanonicalBytes::new(&json!("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG")).unwrap();
        assert_eq!(
            cb.as_bytes(),
            br#""QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG""#
        );
    }

    #[test]
    fn large_integers_survive() {
        let cb = CanonicalBytes::new(&json!({"price": u64::MAX})).unwrap();
        assert_eq!(cb.as_bytes(), br#"{"price":18446744073709551615}"#);
    }
}
