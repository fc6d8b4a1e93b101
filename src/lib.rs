//! `autocheck`: library surface shared by the two CLI binaries, `ac-check`
//! (the per-check engine, component G/H) and `ac-resolve` (the Template
//! Resolver, component I). All domain logic lives in the `ac-*` crates;
//! this crate only wires CLI argument parsing to their public functions, the
//! way the teacher keeps `main.rs` a thin shim over `xchecker::cli::run`.

pub mod cli;

pub use ac_utils::error::EngineError;
pub use ac_utils::exit_codes::ExitCode;
