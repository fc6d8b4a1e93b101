//! `ac-check` and `ac-resolve` argument structures, plus the `@file`
//! response-file expansion both binaries apply before `clap::Parser::parse`
//! sees the argument vector (spec §6: "`@<file>` as sole positional expands
//! into line-separated args").

use camino::Utf8PathBuf;
use clap::Parser;
use std::fs;
use std::io;

/// One `--dep <lookup_name>=<file_path>` pair on the `ac-check` CLI.
#[derive(Debug, Clone)]
pub struct DepArg {
    pub lookup_name: String,
    pub file_path: String,
}

fn parse_dep(raw: &str) -> Result<DepArg, String> {
    match raw.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => Ok(DepArg {
            lookup_name: name.to_string(),
            file_path: path.to_string(),
        }),
        _ => Err(format!("expected NAME=PATH, got '{raw}'")),
    }
}

/// `ac-check`: runs one Check against its dependencies and writes one
/// Result JSON (spec §6, "CLI (engine)").
#[derive(Parser, Debug)]
#[command(name = "ac-check")]
#[command(about = "Run one configuration check against a C/C++ toolchain")]
#[command(long_about = r#"
ac-check loads a single Check Record plus the Result files of its already-
probed dependencies, evaluates its gating requirements and value-selection
condition, optionally compiles/links/runs a synthesized probe against the
given toolchain, and writes one Result JSON.

EXAMPLES:
  ac-check --config toolchain.json --check checks/printf.json \
           --results out/ac_cv_func_printf.json

  ac-check --config toolchain.json --check checks/have_x.json \
           --results out/have_x.json \
           --dep ac_cv_func_foo=out/ac_cv_func_foo.json

  # Response file, for argument-length limits:
  ac-check @args.rsp

Exit code 0 covers both an affirmative result and an ordinary probe
failure or unmet requirement — both are data, not errors. Exit code 1
means a structural problem: malformed JSON, an unknown check kind, or a
condition referencing an identifier absent from the supplied dependencies.
"#)]
pub struct CheckArgs {
    /// Path to the Toolchain Config JSON (component A).
    #[arg(long)]
    pub config: Utf8PathBuf,

    /// Path to the Check Record JSON (component B).
    #[arg(long)]
    pub check: Utf8PathBuf,

    /// Path to write the Result Record JSON (component C/H).
    #[arg(long)]
    pub results: Utf8PathBuf,

    /// A dependency's result file, as `NAME=PATH`. Repeatable.
    #[arg(long = "dep", value_parser = parse_dep)]
    pub dep: Vec<DepArg>,
}

/// `ac-resolve`: merges many Result files and substitutes into a template
/// (spec §6, "CLI (resolver)").
#[derive(Parser, Debug)]
#[command(name = "ac-resolve")]
#[command(about = "Merge configuration-check results into a config.h-style header")]
#[command(long_about = r#"
ac-resolve loads every Result JSON named on the command line, merges them
into one lookup keyed by cache/define/subst name (rejecting any
disagreement on a shared key), and rewrites a template's `#undef`/`#define`
lines and `@NAME@` substitution tokens against that lookup.

EXAMPLES:
  ac-resolve --define-result out/have_x.json --subst-result out/prefix.json \
             --template config.h.in --output config.h --mode all

  ac-resolve --template config.h.in --output config.h --mode defines \
             --define-result out/*.json

  ac-resolve --template Makefile.in --output Makefile --mode subst \
             --subst-result out/*.json \
             --subst PACKAGE_VERSION 1.2.3

Exit code 1 on a merge conflict (two files disagree on a shared key), a
missing inline-splice marker, or an unreadable template/output path.
"#)]
pub struct ResolveArgs {
    /// A Result file contributing `#define`/`#undef` placeholders. Repeatable.
    #[arg(long = "define-result")]
    pub define_result: Vec<String>,

    /// A Result file contributing `@NAME@` substitution values. Repeatable.
    #[arg(long = "subst-result")]
    pub subst_result: Vec<String>,

    /// A Result file that only participates in merge-conflict checking
    /// (neither placeholder class). Repeatable.
    #[arg(long = "cache-result")]
    pub cache_result: Vec<String>,

    /// Path to the template to resolve.
    #[arg(long)]
    pub template: Utf8PathBuf,

    /// Path to write the resolved output.
    #[arg(long)]
    pub output: Utf8PathBuf,

    /// Which placeholder classes to rewrite: `defines`, `subst`, or `all`.
    #[arg(long, default_value = "all")]
    pub mode: String,

    /// An inline-splice marker and the file whose contents replace it, as
    /// two consecutive values (`--inline NEEDLE FILE`). Repeatable.
    #[arg(long = "inline", num_args = 2, value_names = ["NEEDLE", "FILE"])]
    pub inline: Vec<String>,

    /// A literal text substitution, as two consecutive values
    /// (`--subst NAME VALUE`). Repeatable.
    #[arg(long = "subst", num_args = 2, value_names = ["NAME", "VALUE"])]
    pub subst: Vec<String>,
}

impl ResolveArgs {
    /// Chunk the flattened `--inline` occurrences into `(needle, file)` pairs.
    #[must_use]
    pub fn inline_pairs(&self) -> Vec<(String, String)> {
        chunk_pairs(&self.inline)
    }

    /// Chunk the flattened `--subst` occurrences into `(literal, replacement)` pairs.
    #[must_use]
    pub fn subst_pairs(&self) -> Vec<(String, String)> {
        chunk_pairs(&self.subst)
    }
}

fn chunk_pairs(flat: &[String]) -> Vec<(String, String)> {
    flat.chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect()
}

/// Expand a sole `@<file>` positional into line-separated arguments (spec
/// §6). Blank lines are skipped so a trailing newline in the response file
/// doesn't produce a spurious empty argument. Any other argument vector is
/// returned unchanged — response-file expansion only applies when `@file`
/// is the *entire* argument list.
pub fn expand_response_file(args: Vec<String>) -> io::Result<Vec<String>> {
    if args.len() != 1 {
        return Ok(args);
    }
    let Some(path) = args[0].strip_prefix('@') else {
        return Ok(args);
    };
    let contents = fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
