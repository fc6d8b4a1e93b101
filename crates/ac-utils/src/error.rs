//! Structural error taxonomy.
//!
//! Per the engine's error-handling design, only *structural* problems are
//! represented as [`EngineError`] — malformed JSON, an unknown check kind,
//! a missing required field, an unresolved identifier in a `condition`, a
//! duplicate dependency mapping to divergent result files, or a resolver
//! merge conflict. Probe failures and unmet requirements are data, not
//! errors: they flow through as an ordinary [`ac_model::ResultRecord`] with
//! `success = false`.

use thiserror::Error;

/// Top-level structural error. Any variant reaching the CLI maps to exit
/// code 1; the engine never recovers from one of these by writing a
/// partial result.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("toolchain config error: {0}")]
    Config(#[from] ConfigError),

    #[error("check record error: {0}")]
    Check(#[from] CheckError),

    #[error("condition/requirement evaluation error: {0}")]
    Eval(#[from] EvalError),

    #[error("dependency loader error: {0}")]
    Deps(#[from] DepsError),

    #[error("template resolver error: {0}")]
    Resolver(#[from] ResolverError),

    #[error("probe execution error: {0}")]
    Probe(#[from] ProbeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors loading or validating a Toolchain Config (component A).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("toolchain config not found at {path}")]
    NotFound { path: String },

    #[error("toolchain config at {path} is not valid JSON: {reason}")]
    InvalidJson { path: String, reason: String },

    #[error("toolchain config is missing required field '{field}'")]
    MissingField { field: &'static str },
}

/// Errors loading or validating a Check Record (component B).
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("check at {path} is not valid JSON: {reason}")]
    InvalidJson { path: String, reason: String },

    #[error("unknown check kind '{kind}'")]
    UnknownKind { kind: String },

    #[error("check '{name}' of kind {kind} requires a 'code' field")]
    MissingCode { name: String, kind: String },

    #[error("check is missing required field '{field}'")]
    MissingField { field: &'static str },
}

/// Errors from the Requirement & Condition Evaluator (component E).
///
/// Only the fatal branch (missing identifier during *condition*
/// evaluation) belongs here. A missing identifier during *requirement*
/// evaluation is not an error — it makes the requirement evaluate false.
#[derive(Error, Debug)]
pub enum EvalError {
    #[error("unknown predicate syntax: '{predicate}'")]
    MalformedPredicate { predicate: String },

    #[error("condition references unknown identifier '{ident}'")]
    UnknownIdentifier { ident: String },
}

/// Errors from the Dependency Loader (component D).
#[derive(Error, Debug)]
pub enum DepsError {
    #[error("dependency file {path} is not valid JSON: {reason}")]
    InvalidJson { path: String, reason: String },

    #[error(
        "duplicate dependency key '{key}': {first_path} and {second_path} disagree on the result they provide"
    )]
    Conflict {
        key: String,
        first_path: String,
        second_path: String,
    },
}

/// Errors from the Probe Runner (component F).
///
/// These cover *tooling* failures (could not spawn the compiler at all) —
/// not a non-zero compiler exit code, which is an ordinary probe failure
/// reported as data.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("failed to spawn '{program}': {reason}")]
    Spawn { program: String, reason: String },

    #[error("scratch directory {path} could not be prepared: {reason}")]
    ScratchDir { path: String, reason: String },
}

/// Errors from the Template Resolver (component I).
#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("result file {path} is not valid JSON: {reason}")]
    InvalidJson { path: String, reason: String },

    #[error(
        "merge conflict on key '{key}': {first_path} and {second_path} disagree on (success, value)"
    )]
    Conflict {
        key: String,
        first_path: String,
        second_path: String,
    },

    #[error("template {path} could not be read: {reason}")]
    TemplateUnreadable { path: String, reason: String },

    #[error("inline splice label '{label}' is not present in the template")]
    InlineLabelNotFound { label: String },
}
