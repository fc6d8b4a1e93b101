//! Dependency Loader (component D): reads the result files the frontend
//! names on the Check's `requires`/`condition`/`compile_defines` edges
//! into one lookup keyed by cache name, define name, and subst name.

use ac_model::ResultRecord;
use ac_utils::error::DepsError;
use camino::Utf8Path;
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

/// One `--dep <lookup_name>=<file_path>` pair from the engine CLI.
#[derive(Debug, Clone)]
pub struct DepSpec {
    pub lookup_name: String,
    pub file_path: String,
}

/// The merged lookup: resolving an identifier tries cache name, then
/// define name, then subst name, but since all three are indexed into the
/// same map (and collisions across them are rejected unless they agree —
/// invariant 1, §3) a single `get` already implements that priority.
#[derive(Debug, Default, Clone)]
pub struct DepMap {
    by_key: HashMap<String, Arc<ResultRecord>>,
}

impl DepMap {
    #[must_use]
    pub fn get(&self, ident: &str) -> Option<&ResultRecord> {
        self.by_key.get(ident).map(|r| r.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Load every dependency file named in `deps` into one [`DepMap`].
///
/// Each file is a JSON object `{<name>: {success, value, define?, subst?,
/// kind, unquote}}`. Every entry is inserted under its cache name
/// (the object key) and, if present, its `define` and `subst` names too.
/// A name that two different files map to *different* results is a fatal
/// structural error; agreeing duplicates are idempotent (§4.D).
pub fn load(deps: &[DepSpec]) -> Result<DepMap, DepsError> {
    let mut map = DepMap::default();
    // (key -> path it was first seen in), so conflicts can name both paths.
    let mut origin: HashMap<String, String> = HashMap::new();

    for dep in deps {
        let path = Utf8Path::new(&dep.file_path);
        let text = fs::read_to_string(path).map_err(|e| DepsError::InvalidJson {
            path: dep.file_path.clone(),
            reason: e.to_string(),
        })?;
        let entries: HashMap<String, ResultRecord> =
            serde_json::from_str(&text).map_err(|e| DepsError::InvalidJson {
                path: dep.file_path.clone(),
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
                insert_or_check(&mut map, &mut origin, key, &result, &dep.file_path)?;
            }
        }
    }

    Ok(map)
}

fn insert_or_check(
    map: &mut DepMap,
    origin: &mut HashMap<String, String>,
    key: String,
    result: &Arc<ResultRecord>,
    path: &str,
) -> Result<(), DepsError> {
    match map.by_key.get(&key) {
        Some(existing) if existing.as_ref() != result.as_ref() => Err(DepsError::Conflict {
            key: key.clone(),
            first_path: origin.get(&key).cloned().unwrap_or_default(),
            second_path: path.to_string(),
        }),
        Some(_) => Ok(()), // agreeing duplicate: idempotent
        None => {
            origin.insert(key.clone(), path.to_string());
            map.by_key.insert(key, Arc::clone(result));
            Ok(())
        }
    }
}
