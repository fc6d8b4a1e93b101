//! Check Dispatcher and Result Serializer (components G and H): decides
//! whether a check's gating predicates are met, drives the Probe Runner
//! when they are, applies the value-selection algorithm from §4.G, and
//! writes the resulting [`ResultRecord`] atomically as JSON.

use ac_deps::DepMap;
use ac_model::{CheckKind, CheckRecord, ResultRecord, StoredValue};
use ac_probe::ProbeOutcome;
use ac_toolchain::ToolchainConfig;
use ac_utils::atomic_write::write_file_atomic;
use ac_utils::error::EngineError;
use ac_utils::process::ProcessRunner;
use camino::Utf8Path;
use std::collections::HashMap;

/// Evaluate `requires`, dispatch to the Probe Runner unless the check is
/// probeless or gated off, apply value selection, and return the typed
/// Result. Does not write anything — call [`write_result`] with the
/// return value to persist it (§4.H).
pub fn dispatch<R: ProcessRunner>(
    runner: &R,
    check: &CheckRecord,
    toolchain: &ToolchainConfig,
    deps: &DepMap,
    artifact_dir: &Utf8Path,
) -> Result<ResultRecord, EngineError> {
    for raw in &check.requires {
        let pred = ac_eval::parse(raw)?;
        if !ac_eval::evaluate_requirement(&pred, deps) {
            return Ok(ResultRecord::skipped(
                check.kind,
                check.define.clone(),
                check.subst.clone(),
                check.unquote,
            ));
        }
    }

    let probe_outcome = if check.kind.is_probeless() {
        ProbeOutcome { success: true, run_exit: None }
    } else {
        ac_probe::run_probe(runner, check, toolchain, deps, artifact_dir)?
    };

    // Decl reports success unconditionally (§4.G); every other kind's
    // reported success is the raw compile/link/run outcome.
    let reported_success = match check.kind {
        CheckKind::Decl => true,
        _ => probe_outcome.success,
    };
    let value = select_value(check, &probe_outcome, deps)?;

    Ok(ResultRecord {
        success: reported_success,
        value,
        define: check.define.clone(),
        subst: check.subst.clone(),
        kind: check.kind,
        unquote: check.unquote,
    })
}

/// The value-selection algorithm (§4.G): a `condition` predicate takes
/// priority over everything, then a run-kind's decimal exit code, then a
/// plain success/failure fallback to `define_value`/`define_value_fail`
/// (defaulting to the literal `"1"`/`"0"`).
fn select_value(
    check: &CheckRecord,
    probe_outcome: &ProbeOutcome,
    deps: &DepMap,
) -> Result<Option<StoredValue>, EngineError> {
    if let Some(condition) = &check.condition {
        let pred = ac_eval::parse(condition)?;
        let met = ac_eval::evaluate_condition(&pred, deps)?;
        return Ok(if met {
            check.define_value.clone()
        } else {
            check.define_value_fail.clone()
        });
    }

    if let Some(run_exit) = probe_outcome.run_exit {
        return Ok(Some(StoredValue::Number(serde_json::Number::from(run_exit))));
    }

    Ok(if probe_outcome.success {
        Some(check.define_value.clone().unwrap_or(StoredValue::String("1".to_string())))
    } else {
        Some(check.define_value_fail.clone().unwrap_or(StoredValue::String("0".to_string())))
    })
}

/// Write one Result as the per-check result file: a single-entry JSON
/// object keyed by the check's cache name, atomically (§4.H), so the
/// Dependency Loader can read it back with no other changes.
pub fn write_result(path: &Utf8Path, cache_name: &str, result: &ResultRecord) -> Result<(), EngineError> {
    let mut entry = HashMap::new();
    entry.insert(cache_name, result);
    let json = serde_json::to_string_pretty(&entry)?;
    write_file_atomic(path, &json)?;
    Ok(())
}
