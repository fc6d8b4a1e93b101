//! Filesystem-safe name sanitization.
//!
//! The Probe Runner derives a globally unique artifact base name from a
//! check's cache name (e.g. `ac_cv_func_printf`), which is usually already
//! filesystem-safe, but cache names are frontend-controlled strings and
//! must not be trusted to avoid path separators or reserved characters.

const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Replace `/ \ : * ? " < > |` with `_`, as required for a probe's
/// artifact base name.
#[must_use]
pub fn sanitize_base(name: &str) -> String {
    name.chars()
        .map(|c| if RESERVED.contains(&c) { '_' } else { c })
        .collect()
}
