//! Result Record (component C): the typed outcome of one probe, written by
//! the Result Serializer (component H) and read back by the Dependency
//! Loader (component D) and the Template Resolver (component I).
//!
//! On the wire a Result is stored as one entry of a JSON object keyed by
//! cache name (`{<cache_name>: {success, value, define?, subst?, kind,
//! unquote}}`); [`ResultRecord`] models the *value* side of that entry —
//! the cache name itself is carried by whatever map it lives in.

use crate::kind::CheckKind;
use crate::value::{self, StoredValue};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub success: bool,
    pub value: Option<StoredValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub define: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subst: Option<String>,
    pub kind: CheckKind,
    pub unquote: bool,
}

/// Raw wire shape used only to drive [`ResultRecord`]'s custom
/// `Deserialize` impl — it exists so the legacy `has_value` field can be
/// consumed without becoming a permanent part of the type.
#[derive(Deserialize)]
struct RawResultRecord {
    success: bool,
    #[serde(default)]
    value: Option<serde_json::Value>,
    #[serde(default)]
    has_value: Option<bool>,
    #[serde(default)]
    define: Option<String>,
    #[serde(default)]
    subst: Option<String>,
    kind: CheckKind,
    #[serde(default)]
    unquote: bool,
}

impl<'de> Deserialize<'de> for ResultRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawResultRecord::deserialize(deserializer)?;
        let value = value::option_from_raw(raw.value, raw.has_value).map_err(D::Error::custom)?;
        Ok(ResultRecord {
            success: raw.success,
            value,
            define: raw.define,
            subst: raw.subst,
            kind: raw.kind,
            unquote: raw.unquote,
        })
    }
}

impl ResultRecord {
    /// The canonical "skipped" result: a requirement was unmet, so the
    /// check was never probed (§8, Requirement monotonicity).
    #[must_use]
    pub fn skipped(kind: CheckKind, define: Option<String>, subst: Option<String>, unquote: bool) -> Self {
        ResultRecord {
            success: false,
            value: None,
            define,
            subst,
            kind,
            unquote,
        }
    }

    /// Truthiness per §4.E: success, and a value that is present,
    /// non-empty, and not the string `"0"`.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        if !self.success {
            return false;
        }
        match &self.value {
            None => false,
            Some(v) if v.is_explicit_empty_string() => false,
            Some(StoredValue::String(s)) if s == "0" => false,
            Some(_) => true,
        }
    }
}
