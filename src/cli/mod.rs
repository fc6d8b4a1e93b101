//! CLI argument definitions and per-binary dispatch (spec §6, External
//! Interfaces). One module per binary, mirroring the teacher's
//! `cli::args` / `cli::commands` split.

pub mod args;
pub mod check;
pub mod resolve;
