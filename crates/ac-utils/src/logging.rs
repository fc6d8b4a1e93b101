//! Logging setup.
//!
//! The engine exposes a single diagnostic environment variable,
//! `AC_CHECK_VERBOSE`, with three levels:
//!
//! - unset / `0`: silent — only `tracing::error!` reaches the terminal.
//! - `1`: informational — check dispatch, requirement outcomes.
//! - `2`: verbose command-echo — the synthesized probe source and the
//!   exact compiler/linker command line are logged at `debug!`.

use std::io::IsTerminal;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Verbosity levels understood by `AC_CHECK_VERBOSE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent,
    Info,
    Verbose,
}

impl Verbosity {
    /// Read `AC_CHECK_VERBOSE` from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var("AC_CHECK_VERBOSE").as_deref() {
            Ok("2") => Verbosity::Verbose,
            Ok("1") => Verbosity::Info,
            _ => Verbosity::Silent,
        }
    }

    fn tracing_level(self) -> Level {
        match self {
            Verbosity::Silent => Level::ERROR,
            Verbosity::Info => Level::INFO,
            Verbosity::Verbose => Level::DEBUG,
        }
    }
}

/// Initialize the global tracing subscriber. Safe to call more than once
/// per process (subsequent calls are no-ops) so both binaries and their
/// integration tests can call it unconditionally.
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.tracing_level().to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
}
