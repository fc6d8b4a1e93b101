//! `ac-resolve` dispatch: wires the CLI arguments to the Template Resolver
//! (component I).

use crate::cli::args::ResolveArgs;
use ac_template::{Mode, ResolveInputs};
use ac_utils::atomic_write::write_file_atomic;
use ac_utils::error::{EngineError, ResolverError};
use std::fs;

/// Resolve one template against the merged Result universe and write the
/// output atomically (spec §4.I).
pub fn run(args: &ResolveArgs) -> Result<(), EngineError> {
    let mode = Mode::parse(&args.mode)?;
    let template = fs::read_to_string(&args.template).map_err(|e| ResolverError::TemplateUnreadable {
        path: args.template.to_string(),
        reason: e.to_string(),
    })?;

    let inline = args.inline_pairs();
    let literal_subst = args.subst_pairs();

    let inputs = ResolveInputs {
        define_results: &args.define_result,
        subst_results: &args.subst_result,
        cache_results: &args.cache_result,
        template: &template,
        mode,
        inline: &inline,
        literal_subst: &literal_subst,
    };

    let rendered = ac_template::resolve(&inputs)?;
    write_file_atomic(&args.output, &rendered)?;
    tracing::info!(output = %args.output, mode = ?args.mode, "template resolved");
    Ok(())
}
