//! Probe Runner (component F): synthesises one probe's source, compiles,
//! optionally links, and optionally runs it with the Toolchain Config,
//! returning the raw compile/link outcome and (for run-kinds) the
//! process's integer exit code. The Check Dispatcher (component G, in
//! `ac-dispatch`) turns this into a typed [`ac_model::ResultRecord`].

mod invocation;
mod synth;
mod windows_path;

use ac_deps::DepMap;
use ac_model::{CheckKind, CheckRecord};
use ac_toolchain::ToolchainConfig;
use ac_utils::error::{EvalError, ProbeError};
use ac_utils::process::{CommandSpec, ProcessRunner};
use ac_utils::sanitize::sanitize_base;
use ac_utils::scratch::ProbeArtifacts;
use camino::Utf8Path;

/// The outcome of one probe invocation, before value-selection (§4.G).
#[derive(Debug, Clone, Copy)]
pub struct ProbeOutcome {
    /// `true` iff every compile/link step this kind requires succeeded.
    pub success: bool,
    /// `Some(code)` for the run-kinds (`Sizeof`/`Alignof`/`ComputeInt`/
    /// `Endian`) once the compiled probe has actually executed; `None`
    /// otherwise, including when compilation itself failed.
    pub run_exit: Option<i32>,
}

/// Compose the final probe source: `#define` lines synthesised from
/// `compile_defines`, in order, followed by the probe body (§4.G). Each
/// name in `compile_defines` must resolve in `deps` — like `condition`,
/// this is part of the transitive-closure invariant (§3 invariant 3), so a
/// miss is fatal rather than silently dropped.
pub fn compose_source(check: &CheckRecord, deps: &DepMap, family: ac_toolchain::CompilerFamily) -> Result<String, EvalError> {
    let mut source = String::new();
    for ident in &check.compile_defines {
        let result = deps
            .get(ident)
            .ok_or_else(|| EvalError::UnknownIdentifier { ident: ident.clone() })?;
        if let Some(value) = &result.value {
            source.push_str(&format!("#define {} {}\n", ident, value.render_unquoted()));
        }
    }

    match check.kind {
        CheckKind::Function | CheckKind::Lib => {
            source.push_str(&synth::function_probe_source(&check.name, family));
        }
        _ => source.push_str(check.code.as_deref().unwrap_or_default()),
    }
    Ok(source)
}

/// Run one probe: write its synthesised source, compile it, link and/or
/// run it as the check's kind demands, and report the raw outcome. Probe
/// artifacts are cleaned up on every exit path via [`ProbeArtifacts`]'s
/// `Drop` impl, including if `runner.run` panics.
pub fn run_probe<R: ProcessRunner>(
    runner: &R,
    check: &CheckRecord,
    toolchain: &ToolchainConfig,
    deps: &DepMap,
    artifact_dir: &Utf8Path,
) -> Result<ProbeOutcome, ProbeError> {
    let family = toolchain.family();
    let source = compose_source(check, deps, family).map_err(|e| ProbeError::Spawn {
        program: check.name.clone(),
        reason: e.to_string(),
    })?;

    let is_cpp = check.language == "cpp";
    let base = sanitize_base(&check.name);
    let mut artifacts = ProbeArtifacts::new(artifact_dir, base);

    let src_suffix = if is_cpp { ".cpp" } else { ".c" };
    let src_path = artifacts.path(src_suffix);
    std::fs::write(&src_path, &source).map_err(|e| ProbeError::ScratchDir {
        path: src_path.to_string(),
        reason: e.to_string(),
    })?;
    tracing::debug!(probe = %check.name, kind = ?check.kind, source = %source, "synthesized probe source");

    let obj_suffix = match family {
        ac_toolchain::CompilerFamily::Msvc => ".obj",
        ac_toolchain::CompilerFamily::Posix => ".o",
    };
    let obj_path = artifacts.path(obj_suffix);

    let compile_cmd = invocation::compile_only(toolchain, family, is_cpp, &src_path, &obj_path);
    let compile_output = spawn(runner, &compile_cmd, family)?;
    if !compile_output.success() {
        return Ok(ProbeOutcome { success: false, run_exit: None });
    }

    if !check.kind.links_probe() {
        return Ok(ProbeOutcome { success: true, run_exit: None });
    }

    let exe_suffix = match family {
        ac_toolchain::CompilerFamily::Msvc => ".exe",
        ac_toolchain::CompilerFamily::Posix => "",
    };
    let exe_path = artifacts.path(exe_suffix);
    let library = (check.kind == CheckKind::Lib).then(|| check.library.as_deref()).flatten();
    let link_cmd = invocation::link_only(toolchain, family, is_cpp, &obj_path, &exe_path, library);
    let link_output = spawn(runner, &link_cmd, family)?;
    if !link_output.success() {
        return Ok(ProbeOutcome { success: false, run_exit: None });
    }

    if !check.kind.runs_probe() {
        return Ok(ProbeOutcome { success: true, run_exit: None });
    }

    let run_cmd = CommandSpec::new(exe_path.as_str());
    let run_output = spawn(runner, &run_cmd, family)?;
    Ok(ProbeOutcome {
        success: true,
        run_exit: run_output.exit_code,
    })
}

fn spawn<R: ProcessRunner>(
    runner: &R,
    cmd: &CommandSpec,
    family: ac_toolchain::CompilerFamily,
) -> Result<ac_utils::process::ProcessOutput, ProbeError> {
    if tracing::enabled!(tracing::Level::DEBUG) {
        tracing::debug!(command = %invocation::render_for_log(cmd, family), "invoking probe toolchain step");
    }
    runner.run(cmd).map_err(|e| ProbeError::Spawn {
        program: cmd.program.to_string_lossy().into_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ac_model::CheckKind;
    use ac_utils::process::ProcessOutput;
    use std::cell::RefCell;
    use std::ffi::OsString;

    fn toolchain() -> ToolchainConfig {
        ToolchainConfig {
            c_compiler: "cc".into(),
            cpp_compiler: "c++".into(),
            linker: "cc".into(),
            c_flags: vec![],
            cpp_flags: vec![],
            c_link_flags: vec![],
            cpp_link_flags: vec![],
            compiler_type: "gcc".into(),
        }
    }

    fn check(kind_json: &str) -> CheckRecord {
        serde_json::from_str(kind_json).unwrap()
    }

    /// A fake runner that records every command it was asked to run and
    /// replays a scripted sequence of exit codes.
    struct ScriptedRunner {
        calls: RefCell<Vec<Vec<OsString>>>,
        exit_codes: RefCell<Vec<i32>>,
    }

    impl ScriptedRunner {
        fn new(exit_codes: Vec<i32>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                exit_codes: RefCell::new(exit_codes),
            }
        }
    }

    impl ProcessRunner for ScriptedRunner {
        fn run(&self, cmd: &CommandSpec) -> Result<ProcessOutput, std::io::Error> {
            self.calls.borrow_mut().push(cmd.args.clone());
            let code = self.exit_codes.borrow_mut().remove(0);
            Ok(ProcessOutput {
                stdout: Vec::new(),
                stderr: Vec::new(),
                exit_code: Some(code),
            })
        }
    }

    #[test]
    fn type_probe_compiles_only_and_never_links() {
        let check = check(
            r#"{"type":"type","name":"ac_cv_type_pid_t","code":"int main(void){return sizeof(pid_t);}"}"#,
        );
        let deps = DepMap::default();
        let dir = tempfile::tempdir().unwrap();
        let artifact_dir = camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let runner = ScriptedRunner::new(vec![0]);

        let outcome = run_probe(&runner, &check, &toolchain(), &deps, &artifact_dir).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.run_exit, None);
        assert_eq!(runner.calls.borrow().len(), 1);
    }

    #[test]
    fn function_probe_compiles_and_links_without_running() {
        let check = check(r#"{"type":"function","name":"printf"}"#);
        let deps = DepMap::default();
        let dir = tempfile::tempdir().unwrap();
        let artifact_dir = camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let runner = ScriptedRunner::new(vec![0, 0]);

        let outcome = run_probe(&runner, &check, &toolchain(), &deps, &artifact_dir).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.run_exit, None);
        assert_eq!(runner.calls.borrow().len(), 2);
    }

    #[test]
    fn lib_probe_appends_library_argument_to_link_step() {
        let check = check(
            r#"{"type":"lib","name":"ac_cv_lib_pthread_pthread_create","library":"pthread"}"#,
        );
        assert_eq!(check.kind, CheckKind::Lib);
        let deps = DepMap::default();
        let dir = tempfile::tempdir().unwrap();
        let artifact_dir = camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let runner = ScriptedRunner::new(vec![0, 0]);

        run_probe(&runner, &check, &toolchain(), &deps, &artifact_dir).unwrap();
        let calls = runner.calls.borrow();
        let link_args = &calls[1];
        assert!(link_args.contains(&OsString::from("-lpthread")));
    }

    #[test]
    fn sizeof_probe_runs_and_reports_exit_code() {
        let check = check(
            r#"{"type":"sizeof","name":"ac_cv_sizeof_long","code":"#include <stdio.h>\nint main(void){return (int)sizeof(long);}"}"#,
        );
        let deps = DepMap::default();
        let dir = tempfile::tempdir().unwrap();
        let artifact_dir = camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let runner = ScriptedRunner::new(vec![0, 0, 8]);

        let outcome = run_probe(&runner, &check, &toolchain(), &deps, &artifact_dir).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.run_exit, Some(8));
        assert_eq!(runner.calls.borrow().len(), 3);
    }

    #[test]
    fn failed_compile_short_circuits_before_linking() {
        let check = check(r#"{"type":"compile","name":"ac_cv_compile_x","code":"int main(void){return x;}"}"#);
        let deps = DepMap::default();
        let dir = tempfile::tempdir().unwrap();
        let artifact_dir = camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let runner = ScriptedRunner::new(vec![1]);

        let outcome = run_probe(&runner, &check, &toolchain(), &deps, &artifact_dir).unwrap();
        assert!(!outcome.success);
        assert_eq!(runner.calls.borrow().len(), 1);
    }

    #[test]
    fn compile_defines_prepend_hash_define_lines_from_deps() {
        let check = check(
            r#"{"type":"compile","name":"ac_cv_compile_x","code":"int main(void){return HAVE_X;}","compile_defines":["HAVE_X"]}"#,
        );
        let dir = tempfile::tempdir().unwrap();
        let dep_path = dir.path().join("deps.json");
        std::fs::write(
            &dep_path,
            r#"{"ac_cv_have_x":{"success":true,"value":"1","define":"HAVE_X","kind":"define","unquote":false}}"#,
        )
        .unwrap();
        let deps = ac_deps::load(&[ac_deps::DepSpec {
            lookup_name: "ac_cv_have_x".into(),
            file_path: dep_path.to_string_lossy().into_owned(),
        }])
        .unwrap();

        let source = compose_source(&check, &deps, ac_toolchain::CompilerFamily::Posix).unwrap();
        assert!(source.starts_with("#define HAVE_X 1\n"));
    }

    #[test]
    fn compile_defines_with_unresolved_identifier_is_fatal() {
        let check = check(
            r#"{"type":"compile","name":"ac_cv_compile_x","code":"int main(void){return 0;}","compile_defines":["MISSING"]}"#,
        );
        let deps = DepMap::default();
        assert!(compose_source(&check, &deps, ac_toolchain::CompilerFamily::Posix).is_err());
    }
}
