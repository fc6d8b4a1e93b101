//! Foundation utilities shared by the check engine and the template resolver.
//!
//! This crate carries the ambient concerns that every component in
//! `autocheck` needs and that have nothing to do with autoconf semantics
//! per se: a structural error taxonomy, exit-code mapping, atomic file
//! writes, process execution, and logging setup.

pub mod atomic_write;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod process;
pub mod sanitize;
pub mod scratch;

pub use error::EngineError;
pub use exit_codes::ExitCode;
