//! `ac-check` dispatch: wires the CLI arguments to the Dependency Loader,
//! Check Dispatcher, and Result Serializer (components D, G, H).

use crate::cli::args::{CheckArgs, DepArg};
use ac_deps::DepSpec;
use ac_model::CheckRecord;
use ac_toolchain::ToolchainConfig;
use ac_utils::error::EngineError;
use ac_utils::process::NativeProcessRunner;
use camino::Utf8Path;

/// Run one check end to end and write its Result. Returns the same
/// `EngineError` taxonomy the library crates raise — every variant is
/// structural, per the error-handling design (spec §7).
pub fn run(args: &CheckArgs) -> Result<(), EngineError> {
    let toolchain = ToolchainConfig::load(&args.config)?;
    let check = CheckRecord::load(&args.check)?;

    let dep_specs: Vec<DepSpec> = args
        .dep
        .iter()
        .map(|DepArg { lookup_name, file_path }| DepSpec {
            lookup_name: lookup_name.clone(),
            file_path: file_path.clone(),
        })
        .collect();
    let deps = ac_deps::load(&dep_specs)?;

    // Probe artifacts are staged next to the Check JSON (spec §4.F).
    let artifact_dir: &Utf8Path = args.check.parent().unwrap_or_else(|| Utf8Path::new("."));

    let span = tracing::info_span!("check", name = %check.name, kind = ?check.kind);
    let _enter = span.enter();

    let result = ac_dispatch::dispatch(&NativeProcessRunner, &check, &toolchain, &deps, artifact_dir)?;
    tracing::info!(success = result.success, value = ?result.value, "check dispatched");

    ac_dispatch::write_result(&args.results, &check.name, &result)?;
    Ok(())
}
