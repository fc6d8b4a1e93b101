//! The closed enumeration of check kinds (design note §9: tagged variants
//! replace string-type dispatch).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Function,
    Lib,
    Type,
    Compile,
    Link,
    Define,
    #[serde(rename = "m4_variable")]
    M4Variable,
    Sizeof,
    Alignof,
    #[serde(rename = "compute_int")]
    ComputeInt,
    Endian,
    Decl,
    Member,
}

impl CheckKind {
    /// Kinds that never invoke the compiler (§3 invariant 4).
    #[must_use]
    pub fn is_probeless(self) -> bool {
        matches!(self, CheckKind::Define | CheckKind::M4Variable)
    }

    /// Kinds whose probe must be run (not just compiled/linked) to
    /// produce its value, per the dispatch table in §4.G.
    #[must_use]
    pub fn runs_probe(self) -> bool {
        matches!(
            self,
            CheckKind::Sizeof | CheckKind::Alignof | CheckKind::ComputeInt | CheckKind::Endian
        )
    }

    /// Kinds whose probe must link (in addition to compiling).
    #[must_use]
    pub fn links_probe(self) -> bool {
        matches!(self, CheckKind::Function | CheckKind::Lib | CheckKind::Link) || self.runs_probe()
    }

    /// Kinds that mandate a `code` field (§6, External Interfaces).
    ///
    /// `Function` and `Lib` are excluded: the dispatcher synthesizes their
    /// extern-declaration-plus-`main` source itself (§4.G). `Type` is
    /// included even though it probes a single expression, because its
    /// `sizeof(T)` body names a type the engine has no other way to know.
    #[must_use]
    pub fn requires_code(self) -> bool {
        matches!(
            self,
            CheckKind::Type
                | CheckKind::Sizeof
                | CheckKind::Alignof
                | CheckKind::ComputeInt
                | CheckKind::Endian
                | CheckKind::Decl
                | CheckKind::Member
                | CheckKind::Compile
                | CheckKind::Link
        )
    }
}
