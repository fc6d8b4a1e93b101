//! Requirement & Condition Evaluator (component E): parses and evaluates
//! the fixed predicate grammar from spec §4.E.
//!
//! ```text
//! PRED := IDENT            # truthy check
//!       | '!' IDENT        # negated truthy check
//!       | IDENT '==' VALUE # value equality
//!       | IDENT '!=' VALUE # value inequality
//!       | IDENT '='  VALUE # legacy, identical to ==
//! ```
//!
//! A `requires` predicate that names a missing identifier evaluates to
//! `false` (the check is skipped, not an error). A `condition` predicate
//! that names a missing identifier is fatal — the spec's Open Questions
//! section picks the strict interpretation deliberately, because it's the
//! one a test suite can verify (§9).

use ac_deps::DepMap;
use ac_model::StoredValue;
use ac_utils::error::EvalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Truthy { ident: String, negated: bool },
    Compare { ident: String, op: CompareOp, literal: String },
}

impl Predicate {
    /// The identifier this predicate resolves, regardless of variant.
    #[must_use]
    pub fn ident(&self) -> &str {
        match self {
            Predicate::Truthy { ident, .. } => ident,
            Predicate::Compare { ident, .. } => ident,
        }
    }
}

/// Parse one predicate line. Operators are matched `!=` before `==`
/// before bare `=`, since `!=`/`==` are two-character forms that would
/// otherwise be mis-split by a naive single-`=` scan.
pub fn parse(raw: &str) -> Result<Predicate, EvalError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(EvalError::MalformedPredicate {
            predicate: raw.to_string(),
        });
    }

    if let Some(idx) = s.find("!=") {
        let ident = s[..idx].trim();
        let literal = s[idx + 2..].trim();
        return require_ident(ident, raw).map(|ident| Predicate::Compare {
            ident,
            op: CompareOp::Neq,
            literal: literal.to_string(),
        });
    }
    if let Some(idx) = s.find("==") {
        let ident = s[..idx].trim();
        let literal = s[idx + 2..].trim();
        return require_ident(ident, raw).map(|ident| Predicate::Compare {
            ident,
            op: CompareOp::Eq,
            literal: literal.to_string(),
        });
    }
    if let Some(idx) = s.find('=') {
        let ident = s[..idx].trim();
        let literal = s[idx + 1..].trim();
        return require_ident(ident, raw).map(|ident| Predicate::Compare {
            ident,
            op: CompareOp::Eq,
            literal: literal.to_string(),
        });
    }
    if let Some(rest) = s.strip_prefix('!') {
        return require_ident(rest.trim(), raw)
            .map(|ident| Predicate::Truthy { ident, negated: true });
    }
    require_ident(s, raw).map(|ident| Predicate::Truthy { ident, negated: false })
}

fn require_ident(ident: &str, raw: &str) -> Result<String, EvalError> {
    if ident.is_empty() {
        Err(EvalError::MalformedPredicate {
            predicate: raw.to_string(),
        })
    } else {
        Ok(ident.to_string())
    }
}

/// Evaluate a `requires` predicate. A missing identifier makes the
/// requirement false rather than erroring, regardless of negation — `!X`
/// with `X` absent is still unmet, not satisfied (§4.E, "Lookup"; §7,
/// "references a missing cache name" is requirement-unmet).
#[must_use]
pub fn evaluate_requirement(pred: &Predicate, deps: &DepMap) -> bool {
    match pred {
        Predicate::Truthy { ident, negated } => match deps.get(ident) {
            None => false,
            Some(result) => result.is_truthy() != *negated,
        },
        Predicate::Compare { ident, op, literal } => match deps.get(ident) {
            None => false,
            Some(result) => {
                let eq = values_equal(result.value.as_ref(), literal);
                match op {
                    CompareOp::Eq => eq,
                    CompareOp::Neq => !eq,
                }
            }
        },
    }
}

/// Evaluate a `condition` predicate. A missing identifier is fatal — the
/// frontend is responsible for guaranteeing every condition references a
/// value that exists in the transitive closure (§3 invariant 3).
pub fn evaluate_condition(pred: &Predicate, deps: &DepMap) -> Result<bool, EvalError> {
    let result = deps
        .get(pred.ident())
        .ok_or_else(|| EvalError::UnknownIdentifier {
            ident: pred.ident().to_string(),
        })?;
    Ok(match pred {
        Predicate::Truthy { negated, .. } => result.is_truthy() != *negated,
        Predicate::Compare { op, literal, .. } => {
            let eq = values_equal(result.value.as_ref(), literal);
            match op {
                CompareOp::Eq => eq,
                CompareOp::Neq => !eq,
            }
        }
    })
}

/// Compare a stored value against a predicate literal. Both sides are
/// parsed as JSON when possible and compared on their canonical encoded
/// forms, so `1` and `"1"` are never equal; when the literal fails to
/// parse as JSON, both sides fall back to raw-string comparison (§4.E).
fn values_equal(stored: Option<&StoredValue>, literal: &str) -> bool {
    let Some(stored) = stored else {
        return false;
    };
    match serde_json::from_str::<serde_json::Value>(literal) {
        Ok(lit_value) => stored.to_json_value() == lit_value,
        Err(_) => stored.as_raw_string() == literal,
    }
}
