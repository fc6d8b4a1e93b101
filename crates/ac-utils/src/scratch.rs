//! Scoped ownership of one probe's on-disk artifacts.
//!
//! A probe places its source, object, and executable files next to the
//! Check JSON under a globally unique base name. [`ProbeArtifacts`] tracks
//! every path handed out through [`ProbeArtifacts::path`] and removes all
//! of them when it is dropped — including on an unwinding panic — so the
//! scratch directory never accumulates files across probes (resource
//! model, concurrency & resource model §5).

use camino::{Utf8Path, Utf8PathBuf};

/// Owns the set of artifact paths created for one probe invocation.
pub struct ProbeArtifacts {
    dir: Utf8PathBuf,
    base: String,
    created: Vec<Utf8PathBuf>,
}

impl ProbeArtifacts {
    /// Start tracking artifacts for one probe, rooted in `dir` (typically
    /// the directory holding the Check JSON) under `base` (the
    /// filesystem-sanitized cache name).
    #[must_use]
    pub fn new(dir: impl Into<Utf8PathBuf>, base: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            base: base.into(),
            created: Vec::new(),
        }
    }

    /// Compute and register the path for an artifact with the given
    /// suffix (e.g. `".c"`, `".o"`, `".exe"`). The file does not need to
    /// exist yet — it is registered for cleanup regardless, since a
    /// failed compile may still have left a partial object file.
    pub fn path(&mut self, suffix: &str) -> Utf8PathBuf {
        let path = self.dir.join(format!("{}{}", self.base, suffix));
        self.created.push(path.clone());
        path
    }

    /// The directory the artifacts live in.
    #[must_use]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }
}

impl Drop for ProbeArtifacts {
    fn drop(&mut self) {
        for path in &self.created {
            let _ = std::fs::remove_file(path);
        }
    }
}
