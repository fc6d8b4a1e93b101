//! Template Resolver (component I): merges many Result files and
//! substitutes into a template to produce the final `config.h`-style
//! header (§4.I).

mod merge;
mod rewrite;

use ac_utils::error::ResolverError;
use std::fs;

pub use merge::{load_merged, MergedResults};
pub use rewrite::{rewrite_defines, rewrite_substs};

/// Which placeholder classes [`resolve`] rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Defines,
    Subst,
    All,
}

impl Mode {
    /// Parse the `--mode` CLI value (`defines` | `subst` | `all`).
    pub fn parse(raw: &str) -> Result<Self, ResolverError> {
        match raw {
            "defines" => Ok(Mode::Defines),
            "subst" => Ok(Mode::Subst),
            "all" => Ok(Mode::All),
            other => Err(ResolverError::InvalidJson {
                path: "--mode".to_string(),
                reason: format!("unknown mode '{other}', expected defines|subst|all"),
            }),
        }
    }

    fn rewrites_defines(self) -> bool {
        matches!(self, Mode::Defines | Mode::All)
    }

    fn rewrites_subst(self) -> bool {
        matches!(self, Mode::Subst | Mode::All)
    }
}

/// All inputs to one resolve pass, mirroring the resolver CLI's flags
/// (§6: `--define-result`/`--subst-result`/`--cache-result`,
/// `--template`, `--mode`, `--inline`, `--subst`).
pub struct ResolveInputs<'a> {
    pub define_results: &'a [String],
    pub subst_results: &'a [String],
    pub cache_results: &'a [String],
    pub template: &'a str,
    pub mode: Mode,
    /// `(needle, file_path)` pairs to splice verbatim before any
    /// placeholder rewriting.
    pub inline: &'a [(String, String)],
    /// `(literal, replacement)` pairs applied as plain text substitution
    /// after placeholder rewriting.
    pub literal_subst: &'a [(String, String)],
}

/// Resolve one template against the merged Result universe: splice inline
/// content, rewrite `#undef`/`#define`/`@X@` placeholders per `mode`, then
/// apply literal text substitutions, in that order (§4.I).
pub fn resolve(inputs: &ResolveInputs) -> Result<String, ResolverError> {
    let all_paths: Vec<String> = inputs
        .define_results
        .iter()
        .chain(inputs.subst_results.iter())
        .chain(inputs.cache_results.iter())
        .cloned()
        .collect();
    let merged = merge::load_merged(&all_paths)?;

    let mut text = inputs.template.to_string();

    for (needle, file) in inputs.inline {
        if !text.contains(needle.as_str()) {
            return Err(ResolverError::InlineLabelNotFound { label: needle.clone() });
        }
        let content = fs::read_to_string(file).map_err(|e| ResolverError::TemplateUnreadable {
            path: file.clone(),
            reason: e.to_string(),
        })?;
        text = text.replace(needle.as_str(), &content);
    }

    if inputs.mode.rewrites_defines() {
        text = rewrite::rewrite_defines(&text, &merged);
    }
    if inputs.mode.rewrites_subst() {
        text = rewrite::rewrite_substs(&text, &merged);
    }

    for (literal, replacement) in inputs.literal_subst {
        text = text.replace(literal.as_str(), replacement.as_str());
    }

    Ok(text)
}
