//! Merges many Result files into one lookup keyed by cache name, define
//! name, and subst name — the same three-key indexing the Dependency
//! Loader performs (§4.D), but raising [`ResolverError`] instead of
//! `DepsError` since a merge conflict here is the Template Resolver's own
//! structural error (§4.I, "Merging").

use ac_model::ResultRecord;
use ac_utils::error::ResolverError;
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

#[derive(Debug, Default, Clone)]
pub struct MergedResults {
    by_key: HashMap<String, Arc<ResultRecord>>,
}

impl MergedResults {
    #[must_use]
    pub fn get(&self, ident: &str) -> Option<&ResultRecord> {
        self.by_key.get(ident).map(Arc::as_ref)
    }

    #[cfg(test)]
    pub(crate) fn from_map_for_tests(by_key: HashMap<String, Arc<ResultRecord>>) -> Self {
        Self { by_key }
    }
}

/// Load and merge every Result file named across all three classes
/// (defines, substs, cache-only). Merging is associative and commutative
/// except that disagreeing duplicates across files are rejected.
pub fn load_merged(paths: &[String]) -> Result<MergedResults, ResolverError> {
    let mut merged = MergedResults::default();
    let mut origin: HashMap<String, String> = HashMap::new();

    for path in paths {
        let text = fs::read_to_string(path).map_err(|e| ResolverError::InvalidJson {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let entries: HashMap<String, ResultRecord> =
            serde_json::from_str(&text).map_err(|e| ResolverError::InvalidJson {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        for (cache_name, result) in entries {
            let result = Arc::new(result);
            let mut keys = vec![cache_name.clone()];
            if let Some(define) = &result.define {
                keys.push(define.clone());
            }
            if let Some(subst) = &result.subst {
                keys.push(subst.clone());
            }
            for key in keys {
                insert_or_check(&mut merged, &mut origin, key, &result, path)?;
            }
        }
    }

    Ok(merged)
}

fn insert_or_check(
    merged: &mut MergedResults,
    origin: &mut HashMap<String, String>,
    key: String,
    result: &Arc<ResultRecord>,
    path: &str,
) -> Result<(), ResolverError> {
    match merged.by_key.get(&key) {
        Some(existing) if existing.as_ref() != result.as_ref() => Err(ResolverError::Conflict {
            key: key.clone(),
            first_path: origin.get(&key).cloned().unwrap_or_default(),
            second_path: path.to_string(),
        }),
        Some(_) => Ok(()),
        None => {
            origin.insert(key.clone(), path.to_string());
            merged.by_key.insert(key, Arc::clone(result));
            Ok(())
        }
    }
}
