//! Check Record (component B): a typed description of one probe.

use crate::kind::CheckKind;
use crate::value::StoredValue;
use ac_utils::error::CheckError;
use camino::Utf8Path;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;

fn de_opt_stored<'de, D>(deserializer: D) -> Result<Option<StoredValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match raw {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => crate::value::StoredValue::try_from_json(v)
            .map_err(serde::de::Error::custom)
            .map(|opt| opt),
    }
}

/// `{kind, name, define?, subst?, language, code?, define_value?,
/// define_value_fail?, library?, requires[], condition?,
/// compile_defines[], unquote}` — see spec §3/§6.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRecord {
    #[serde(rename = "type")]
    pub kind: CheckKind,
    pub name: String,
    #[serde(default)]
    pub define: Option<String>,
    #[serde(default)]
    pub subst: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "de_opt_stored")]
    pub define_value: Option<StoredValue>,
    #[serde(default, deserialize_with = "de_opt_stored")]
    pub define_value_fail: Option<StoredValue>,
    #[serde(default)]
    pub library: Option<String>,
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub compile_defines: Vec<String>,
    #[serde(default)]
    pub unquote: bool,
}

fn default_language() -> String {
    "c".to_string()
}

impl CheckRecord {
    /// Load a Check Record from its JSON file and validate it (§6: type
    /// and name are mandatory, and certain kinds mandate `code`).
    pub fn load(path: &Utf8Path) -> Result<Self, CheckError> {
        let text = fs::read_to_string(path).map_err(|e| CheckError::InvalidJson {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let check: Self = serde_json::from_str(&text).map_err(|e| CheckError::InvalidJson {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        check.validate()?;
        Ok(check)
    }

    /// Validate the mandatory-`code` rule from the External Interfaces
    /// section: kinds that need caller-supplied probe source must carry
    /// one. `Define`/`M4Variable` never probe, and `Function`/`Lib` have
    /// their extern-declaration-plus-`main` source synthesized by the
    /// dispatcher instead of supplied by the caller (§4.G).
    pub fn validate(&self) -> Result<(), CheckError> {
        if self.name.is_empty() {
            return Err(CheckError::MissingField { field: "name" });
        }
        if self.kind.requires_code() && self.code.as_deref().unwrap_or_default().is_empty() {
            return Err(CheckError::MissingCode {
                name: self.name.clone(),
                kind: format!("{:?}", self.kind),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CheckRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn defaults_language_to_c() {
        let check = parse(r#"{"type":"function","name":"ac_cv_func_printf"}"#);
        assert_eq!(check.language, "c");
        assert!(check.requires.is_empty());
        assert!(!check.unquote);
    }

    #[test]
    fn compile_requires_code_to_validate() {
        let check = parse(r#"{"type":"compile","name":"ac_cv_compile_foo"}"#);
        assert!(matches!(check.validate(), Err(CheckError::MissingCode { .. })));
    }

    #[test]
    fn type_requires_code_but_function_does_not() {
        let ty = parse(r#"{"type":"type","name":"ac_cv_type_pid_t"}"#);
        assert!(matches!(ty.validate(), Err(CheckError::MissingCode { .. })));

        let func = parse(r#"{"type":"function","name":"printf"}"#);
        assert!(func.validate().is_ok());
    }

    #[test]
    fn define_does_not_require_code() {
        let check = parse(
            r#"{"type":"define","name":"ac_cv_define_x","define":"HAVE_X","define_value":"1"}"#,
        );
        assert!(check.validate().is_ok());
        assert_eq!(
            check.define_value,
            Some(StoredValue::String("1".to_string()))
        );
    }

    #[test]
    fn null_define_value_is_absent() {
        let check = parse(
            r#"{"type":"define","name":"ac_cv_define_x","define":"HAVE_X","define_value":null}"#,
        );
        assert_eq!(check.define_value, None);
    }
}
