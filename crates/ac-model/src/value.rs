//! JSON-type-preserving values and the three-state (absent / explicit-empty
//! / present) distinction that the whole pipeline hinges on.
//!
//! A naive `Option<String>` cannot tell "explicitly empty" from "absent",
//! and a plain `String` cannot tell the numeric-looking string `"1"` from
//! the integer `1`. [`StoredValue`] wraps the JSON leaf types (string,
//! number, bool) so both distinctions survive every round trip; the
//! three-state rule itself is just `Option<StoredValue>` plus the
//! convention that `Some(StoredValue::String(s))` with `s.is_empty()` is
//! "explicitly empty".

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A value that preserves its original JSON type through storage.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl StoredValue {
    /// Render for inclusion in a `#define X <v>` line: strings render
    /// without their outer quotes (the quotes were JSON-encoding
    /// punctuation, not probe content); numbers and bools render as
    /// their literal text.
    #[must_use]
    pub fn render_unquoted(&self) -> String {
        match self {
            StoredValue::String(s) => s.clone(),
            StoredValue::Number(n) => n.to_string(),
            StoredValue::Bool(b) => b.to_string(),
        }
    }

    /// `true` iff this is the JSON string `""`.
    #[must_use]
    pub fn is_explicit_empty_string(&self) -> bool {
        matches!(self, StoredValue::String(s) if s.is_empty())
    }

    /// Canonical JSON encoding, used for type-preserving equality in the
    /// condition evaluator: `1` and `"1"` encode differently.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            StoredValue::String(s) => serde_json::Value::String(s.clone()),
            StoredValue::Number(n) => serde_json::Value::Number(n.clone()),
            StoredValue::Bool(b) => serde_json::Value::Bool(*b),
        }
    }

    /// Raw string rendering used when a comparison literal fails to parse
    /// as JSON and both sides fall back to string comparison (§4.E).
    #[must_use]
    pub fn as_raw_string(&self) -> String {
        self.render_unquoted()
    }

    pub(crate) fn try_from_json(value: serde_json::Value) -> Result<Option<Self>, String> {
        match value {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::String(s) => Ok(Some(StoredValue::String(s))),
            serde_json::Value::Number(n) => Ok(Some(StoredValue::Number(n))),
            serde_json::Value::Bool(b) => Ok(Some(StoredValue::Bool(b))),
            other => Err(format!(
                "expected a string, number, bool, or null value, found {other}"
            )),
        }
    }
}

impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_unquoted())
    }
}

impl Serialize for StoredValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StoredValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        StoredValue::try_from_json(value)
            .map_err(D::Error::custom)?
            .ok_or_else(|| D::Error::custom("expected a non-null value"))
    }
}

/// Deserialize an `Option<StoredValue>` from a raw `serde_json::Value`
/// that may be `null` (absent), honoring the legacy `has_value` signal: a
/// `null` paired with `has_value = true` means "explicitly empty", not
/// "absent" (spec §6, External Interfaces).
pub fn option_from_raw(
    raw: Option<serde_json::Value>,
    has_value: Option<bool>,
) -> Result<Option<StoredValue>, String> {
    match raw {
        None | Some(serde_json::Value::Null) => {
            if has_value.unwrap_or(false) {
                Ok(Some(StoredValue::String(String::new())))
            } else {
                Ok(None)
            }
        }
        Some(v) => StoredValue::try_from_json(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn string_one_and_number_one_are_distinct() {
        let s = StoredValue::String("1".to_string());
        let n = StoredValue::Number(serde_json::Number::from(1));
        assert_ne!(s.to_json_value(), n.to_json_value());
        assert_eq!(s.render_unquoted(), n.render_unquoted());
    }

    #[test]
    fn explicit_empty_is_distinguishable_from_absent() {
        assert_eq!(option_from_raw(None, None).unwrap(), None);
        assert_eq!(
            option_from_raw(Some(serde_json::Value::String(String::new())), None).unwrap(),
            Some(StoredValue::String(String::new()))
        );
    }

    #[test]
    fn legacy_has_value_promotes_null_to_explicit_empty() {
        assert_eq!(
            option_from_raw(Some(serde_json::Value::Null), Some(true)).unwrap(),
            Some(StoredValue::String(String::new()))
        );
        assert_eq!(
            option_from_raw(Some(serde_json::Value::Null), Some(false)).unwrap(),
            None
        );
    }

    #[test]
    fn round_trips_through_json() {
        let v = StoredValue::Number(serde_json::Number::from(4));
        let json = serde_json::to_string(&v).unwrap();
        let back: StoredValue = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }

    fn arb_stored_value() -> impl Strategy<Value = StoredValue> {
        prop_oneof![
            "[a-zA-Z0-9_]{0,20}".prop_map(StoredValue::String),
            any::<i64>().prop_map(|n| StoredValue::Number(serde_json::Number::from(n))),
            any::<bool>().prop_map(StoredValue::Bool),
        ]
    }

    proptest! {
        #[test]
        fn stored_value_round_trips_through_json_preserving_leaf_type(v in arb_stored_value()) {
            let json = serde_json::to_string(&v).unwrap();
            let back: StoredValue = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(v, back);
        }

        #[test]
        fn string_and_number_encodings_of_the_same_digits_never_compare_equal(n in any::<i64>()) {
            let s = StoredValue::String(n.to_string());
            let num = StoredValue::Number(serde_json::Number::from(n));
            prop_assert_ne!(s.to_json_value(), num.to_json_value());
            prop_assert_eq!(s.render_unquoted(), num.render_unquoted());
        }

        #[test]
        fn absent_and_explicit_empty_never_collapse(has_value in any::<Option<bool>>()) {
            let out = option_from_raw(None, has_value).unwrap();
            match has_value {
                Some(true) => prop_assert_eq!(out, Some(StoredValue::String(String::new()))),
                _ => prop_assert_eq!(out, None),
            }
        }
    }
}
