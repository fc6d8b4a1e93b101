//! Exit code mapping for the engine and resolver binaries.
//!
//! Per the error-handling design there are exactly two outcomes visible to
//! a process exit code: success (including a probe that failed or a
//! requirement that was unmet — both are data, not errors) and a
//! structural failure.

/// A process exit code. Deliberately narrow: the engine's contract only
/// distinguishes success from structural failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Operation completed — including a probe that failed or a
    /// requirement that was unmet. Both are recorded as data in the
    /// Result, not surfaced as a nonzero exit.
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// Malformed JSON, an unknown check kind, a missing required field, an
    /// unresolved identifier in a `condition`, a duplicate dependency
    /// mapping to divergent results, or a resolver merge conflict.
    pub const STRUCTURAL: ExitCode = ExitCode(1);

    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl From<&crate::error::EngineError> for ExitCode {
    fn from(_err: &crate::error::EngineError) -> Self {
        // Every EngineError variant is structural by construction (see
        // error.rs doc comment); probe failures and unmet requirements
        // never become an EngineError in the first place.
        ExitCode::STRUCTURAL
    }
}
