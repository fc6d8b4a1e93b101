//! Line- and token-level rewriting of `#undef X` / `#define X …` and
//! `@X@` placeholders against a merged Result lookup (§4.I, "Define
//! rewriting" / "Subst rewriting").

use crate::merge::MergedResults;
use ac_model::ResultRecord;
use once_cell::sync::Lazy;
use regex::Regex;

static DEFINE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([ \t]*)#(undef|define)[ \t]+([A-Za-z_][A-Za-z0-9_]*)\b(.*)$").unwrap());

static SUBST_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"@([A-Za-z_][A-Za-z0-9_]*)@").unwrap());

/// Rewrite every `#undef X` / `#define X …` line against `merged`. A name
/// absent from `merged` renders as `/* #undef X */`, *unless* the source
/// line is itself a `#define X <content>` with its own literal content
/// (e.g. `#define VERSION "@@VERSION@@"`) — that line is left untouched,
/// since it's a hand-written default, not an autoheader-style
/// `#undef`/bare-`#define` placeholder, and any `@X@` token it carries
/// still needs to survive for `rewrite_substs` or a later literal
/// substitution pass. Present with no value also renders as
/// `/* #undef X */`; present with an explicit empty value renders as
/// `#define X /**/` (quoted) or `#define X ` with a trailing space
/// (unquoted); present with any other value renders as `#define X <v>`.
#[must_use]
pub fn rewrite_defines(template: &str, merged: &MergedResults) -> String {
    DEFINE_LINE
        .replace_all(template, |caps: &regex::Captures| {
            let indent = &caps[1];
            let directive = &caps[2];
            let ident = &caps[3];
            let tail = caps[4].trim();

            if directive == "define" && !tail.is_empty() && merged.get(ident).is_none() {
                return caps[0].to_string();
            }

            format!("{indent}{}", render_define(ident, merged.get(ident)))
        })
        .into_owned()
}

fn render_define(ident: &str, result: Option<&ResultRecord>) -> String {
    match result {
        None => format!("/* #undef {ident} */"),
        Some(r) => match &r.value {
            None => format!("/* #undef {ident} */"),
            Some(v) if v.is_explicit_empty_string() => {
                if r.unquote {
                    format!("#define {ident} ")
                } else {
                    format!("#define {ident} /**/")
                }
            }
            Some(v) => format!("#define {ident} {}", v.render_unquoted()),
        },
    }
}

/// Replace every `@X@` occurrence against `merged`. A name absent from
/// `merged` leaves the `@X@` token untouched; a present name with no
/// value, or an explicitly empty one, substitutes the empty string; any
/// other value substitutes its unquoted rendering.
#[must_use]
pub fn rewrite_substs(template: &str, merged: &MergedResults) -> String {
    SUBST_TOKEN
        .replace_all(template, |caps: &regex::Captures| {
            let ident = &caps[1];
            match merged.get(ident) {
                None => caps[0].to_string(),
                Some(r) => r.value.as_ref().map(ac_model::StoredValue::render_unquoted).unwrap_or_default(),
            }
        })
        .into_owned()
}
