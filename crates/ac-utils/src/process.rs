//! Secure, synchronous process execution.
//!
//! Every compile, link, and run invocation goes through [`CommandSpec`],
//! which carries arguments as discrete `OsString` elements. The actual
//! spawn always goes through `std::process::Command`'s argv-style API —
//! never a shell string — even though the Probe Runner also renders a
//! shell-quoted form of the command for diagnostic logging (see
//! `ac-probe::invocation`).
//!
//! One probe is one process: the engine never forks a concurrent probe
//! within a single check (concurrency & resource model §5), so this is a
//! blocking interface with no async runtime underneath it.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

/// A command to execute, with arguments as discrete elements.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }
}

/// Output of a finished process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// `None` only if the process was terminated by a signal rather than
    /// exiting normally — `std::process::ExitStatus::code()` already
    /// performs the POSIX wait-status unwrapping / Windows direct-return
    /// split, so no raw `waitpid` handling is needed here.
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Abstraction over process execution so the Probe Runner's source-level
/// logic can be tested without actually invoking a compiler.
pub trait ProcessRunner {
    fn run(&self, cmd: &CommandSpec) -> Result<ProcessOutput, std::io::Error>;
}

/// Spawns the real `std::process::Command` with stdout/stderr captured
/// (redirected away from the terminal unless verbose logging is on, in
/// which case the caller echoes them via `tracing::debug!` after the
/// fact — see `ac-probe::invocation`).
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeProcessRunner;

impl ProcessRunner for NativeProcessRunner {
    fn run(&self, cmd: &CommandSpec) -> Result<ProcessOutput, std::io::Error> {
        let output = cmd.to_command().output()?;
        Ok(ProcessOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.status.code(),
        })
    }
}
