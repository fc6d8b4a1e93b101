//! End-to-end tests for the `ac-check` binary, driven through its real CLI
//! surface via `assert_cmd`, mirroring the teacher's
//! `tests/golden_pipeline_tests.rs` style (temp dir, `Command::cargo_bin`,
//! assertions on exit code and the written JSON).
//!
//! The toolchain's `c_compiler`/`linker` are pointed at `true`/`false` —
//! POSIX utilities that always succeed/fail — rather than a real C
//! compiler, since these tests only need to exercise the engine's
//! dispatch and serialization logic, not actual compilation (spec §4.F
//! drives the compiler purely through argv; it never inspects output).

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn write_toolchain(dir: &TempDir, compiler: &str) -> String {
    let path = dir.path().join("toolchain.json");
    let json = serde_json::json!({
        "c_compiler": compiler,
        "cpp_compiler": compiler,
        "linker": compiler,
        "c_flags": [],
        "cpp_flags": [],
        "c_link_flags": [],
        "cpp_link_flags": [],
        "compiler_type": "gcc",
    });
    fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();
    path.to_string_lossy().into_owned()
}

fn write_check(dir: &TempDir, name: &str, json: &Value) -> String {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string(json).unwrap()).unwrap();
    path.to_string_lossy().into_owned()
}

fn read_result(path: &str) -> Value {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn successful_function_probe_writes_affirmative_result() {
    let dir = TempDir::new().unwrap();
    let toolchain = write_toolchain(&dir, "true");
    let check = write_check(
        &dir,
        "check.json",
        &serde_json::json!({
            "type": "function",
            "name": "ac_cv_func_printf",
            "define": "HAVE_PRINTF",
        }),
    );
    let results = dir.path().join("result.json");

    Command::cargo_bin("ac-check")
        .unwrap()
        .args([
            "--config",
            &toolchain,
            "--check",
            &check,
            "--results",
            results.to_str().unwrap(),
        ])
        .assert()
        .success();

    let result: Value = read_result(results.to_str().unwrap());
    let entry = &result["ac_cv_func_printf"];
    assert_eq!(entry["success"], true);
    assert_eq!(entry["value"], "1");
    assert_eq!(entry["define"], "HAVE_PRINTF");
}

#[test]
fn failed_compile_exits_zero_with_success_false() {
    let dir = TempDir::new().unwrap();
    let toolchain = write_toolchain(&dir, "false");
    let check = write_check(
        &dir,
        "check.json",
        &serde_json::json!({
            "type": "compile",
            "name": "ac_cv_compile_x",
            "code": "int main(void) { return x; }",
        }),
    );
    let results = dir.path().join("result.json");

    // A probe failure is data, not a structural error: exit code 0.
    Command::cargo_bin("ac-check")
        .unwrap()
        .args([
            "--config",
            &toolchain,
            "--check",
            &check,
            "--results",
            results.to_str().unwrap(),
        ])
        .assert()
        .success();

    let result = read_result(results.to_str().unwrap());
    assert_eq!(result["ac_cv_compile_x"]["success"], false);
}

#[test]
fn unmet_requirement_skips_the_probe_and_never_invokes_the_compiler() {
    let dir = TempDir::new().unwrap();
    // "false" would make the test fail if the probe ran at all: the
    // requirement is unmet (no dependency file at all, so the identifier
    // resolves to "missing" and the predicate is false), so the compiler
    // must never be invoked.
    let toolchain = write_toolchain(&dir, "false");
    let check = write_check(
        &dir,
        "check.json",
        &serde_json::json!({
            "type": "function",
            "name": "ac_cv_func_gated",
            "requires": ["HAVE_STDIO_H"],
        }),
    );
    let results = dir.path().join("result.json");

    Command::cargo_bin("ac-check")
        .unwrap()
        .args([
            "--config",
            &toolchain,
            "--check",
            &check,
            "--results",
            results.to_str().unwrap(),
        ])
        .assert()
        .success();

    let result = read_result(results.to_str().unwrap());
    let entry = &result["ac_cv_func_gated"];
    assert_eq!(entry["success"], false);
    assert!(entry["value"].is_null());
}

#[test]
fn malformed_check_json_is_a_structural_error() {
    let dir = TempDir::new().unwrap();
    let toolchain = write_toolchain(&dir, "true");
    let check_path = dir.path().join("check.json");
    fs::write(&check_path, "{ not valid json").unwrap();
    let results = dir.path().join("result.json");

    Command::cargo_bin("ac-check")
        .unwrap()
        .args([
            "--config",
            &toolchain,
            "--check",
            check_path.to_str().unwrap(),
            "--results",
            results.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(1);

    assert!(!results.exists());
}

#[test]
fn condition_referencing_unknown_identifier_is_fatal() {
    let dir = TempDir::new().unwrap();
    let toolchain = write_toolchain(&dir, "true");
    let check = write_check(
        &dir,
        "check.json",
        &serde_json::json!({
            "type": "define",
            "name": "ac_cv_define_x",
            "define": "HAVE_X",
            "condition": "NEVER_DEFINED",
            "define_value": "1",
        }),
    );
    let results = dir.path().join("result.json");

    Command::cargo_bin("ac-check")
        .unwrap()
        .args([
            "--config",
            &toolchain,
            "--check",
            &check,
            "--results",
            results.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn response_file_expands_into_the_same_invocation() {
    let dir = TempDir::new().unwrap();
    let toolchain = write_toolchain(&dir, "true");
    let check = write_check(
        &dir,
        "check.json",
        &serde_json::json!({"type": "function", "name": "ac_cv_func_printf"}),
    );
    let results = dir.path().join("result.json");

    let rsp_path = dir.path().join("args.rsp");
    fs::write(
        &rsp_path,
        format!(
            "--config\n{toolchain}\n--check\n{check}\n--results\n{}\n",
            results.to_str().unwrap()
        ),
    )
    .unwrap();

    Command::cargo_bin("ac-check")
        .unwrap()
        .arg(format!("@{}", rsp_path.to_str().unwrap()))
        .assert()
        .success();

    assert!(results.exists());
}

#[test]
fn idempotent_rerun_produces_identical_result() {
    let dir = TempDir::new().unwrap();
    let toolchain = write_toolchain(&dir, "true");
    let check = write_check(
        &dir,
        "check.json",
        &serde_json::json!({"type": "function", "name": "ac_cv_func_printf", "define": "HAVE_PRINTF"}),
    );
    let results = dir.path().join("result.json");

    for _ in 0..2 {
        Command::cargo_bin("ac-check")
            .unwrap()
            .args([
                "--config",
                &toolchain,
                "--check",
                &check,
                "--results",
                results.to_str().unwrap(),
            ])
            .assert()
            .success();
    }

    let result = read_result(results.to_str().unwrap());
    assert_eq!(result["ac_cv_func_printf"]["success"], true);
}
