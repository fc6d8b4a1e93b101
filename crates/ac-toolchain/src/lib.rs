//! Toolchain Config (component A): a read-only description of the
//! compiler/linker invocation the frontend has already discovered.
//!
//! The engine never discovers a toolchain itself — paths and flag vectors
//! are supplied as input, deserialized here, and handed unmodified (save
//! for warning-promotion filtering) to the Probe Runner.

use ac_utils::error::ConfigError;
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::fs;

/// `{c_compiler, cpp_compiler, linker, c_flags[], cpp_flags[],
/// c_link_flags[], cpp_link_flags[], compiler_type}` — see spec §3/§6.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
    pub c_compiler: String,
    pub cpp_compiler: String,
    pub linker: String,
    #[serde(default)]
    pub c_flags: Vec<String>,
    #[serde(default)]
    pub cpp_flags: Vec<String>,
    #[serde(default)]
    pub c_link_flags: Vec<String>,
    #[serde(default)]
    pub cpp_link_flags: Vec<String>,
    pub compiler_type: String,
}

/// The invocation-syntax family selected by `compiler_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerFamily {
    /// `compiler_type` starts with `"msvc"`.
    Msvc,
    /// Everything else (gcc, clang, and other POSIX-style drivers).
    Posix,
}

impl ToolchainConfig {
    /// Load and validate a Toolchain Config from its JSON file.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|_| ConfigError::NotFound {
            path: path.to_string(),
        })?;
        let config: Self =
            serde_json::from_str(&text).map_err(|e| ConfigError::InvalidJson {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        if config.c_compiler.is_empty() {
            return Err(ConfigError::MissingField { field: "c_compiler" });
        }
        if config.linker.is_empty() {
            return Err(ConfigError::MissingField { field: "linker" });
        }
        Ok(config)
    }

    /// The invocation family selected by `compiler_type`.
    #[must_use]
    pub fn family(&self) -> CompilerFamily {
        if self.compiler_type.starts_with("msvc") {
            CompilerFamily::Msvc
        } else {
            CompilerFamily::Posix
        }
    }

    /// `c_flags` with warning-promotion flags stripped (§4.A).
    #[must_use]
    pub fn c_flags_filtered(&self) -> Vec<String> {
        filter_werror(&self.c_flags)
    }

    /// `cpp_flags` with warning-promotion flags stripped (§4.A).
    #[must_use]
    pub fn cpp_flags_filtered(&self) -> Vec<String> {
        filter_werror(&self.cpp_flags)
    }

    /// `c_link_flags` with warning-promotion flags stripped (§4.A).
    #[must_use]
    pub fn c_link_flags_filtered(&self) -> Vec<String> {
        filter_werror(&self.c_link_flags)
    }

    /// `cpp_link_flags` with warning-promotion flags stripped (§4.A).
    #[must_use]
    pub fn cpp_link_flags_filtered(&self) -> Vec<String> {
        filter_werror(&self.cpp_link_flags)
    }
}

/// Strip exact matches of `-Werror`, `/WX`, `-Werror=all`,
/// `-Wincompatible-library-redeclaration`, and any flag with prefix
/// `-Werror=`. Probes legitimately trigger warnings that would otherwise
/// be promoted to hard failures by the caller's own flags.
fn filter_werror(flags: &[String]) -> Vec<String> {
    const EXACT: &[&str] = &[
        "-Werror",
        "/WX",
        "-Werror=all",
        "-Wincompatible-library-redeclaration",
    ];
    flags
        .iter()
        .filter(|f| !EXACT.contains(&f.as_str()) && !f.starts_with("-Werror="))
        .cloned()
        .collect()
}
