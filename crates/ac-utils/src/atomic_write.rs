//! Atomic file writes: temp file + fsync + rename.
//!
//! Every output the engine produces (a Result JSON, a rendered header) is
//! append-only and must never be observed half-written by a frontend that
//! polls the filesystem — the engine may be killed at any point. This
//! module writes to a temp path in the same directory, fsyncs, then
//! renames into place, with a Windows retry loop for transient rename
//! failures and a cross-filesystem fallback.

use camino::Utf8Path;
use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

#[cfg(target_os = "windows")]
use std::{thread, time::Duration};

/// Write `content` to `path` atomically. On success, no reader can ever
/// observe a partial file at `path`.
pub fn write_file_atomic(path: &Utf8Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_dir = path.parent().unwrap_or_else(|| Utf8Path::new("."));
    let mut temp_file = NamedTempFile::new_in(temp_dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;

    let temp_path = temp_file.path().to_path_buf();
    match atomic_rename(temp_file, path.as_std_path()) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_filesystem_error(&e) => {
            cross_filesystem_copy(&temp_path, path)
        }
        Err(e) => Err(e),
    }
}

#[cfg(target_os = "windows")]
fn atomic_rename(mut temp_file: NamedTempFile, target: &Path) -> std::io::Result<()> {
    const MAX_RETRIES: u32 = 5;
    const INITIAL_DELAY_MS: u64 = 10;
    const MAX_TOTAL_DELAY_MS: u64 = 250;

    let mut retries = 0;
    let mut total_delay_ms = 0;
    loop {
        match temp_file.persist(target) {
            Ok(_) => return Ok(()),
            Err(persist_error) => {
                let retryable = matches!(
                    persist_error.error.kind(),
                    std::io::ErrorKind::PermissionDenied | std::io::ErrorKind::Other
                );
                if !retryable || retries >= MAX_RETRIES {
                    return Err(persist_error.error);
                }
                let delay_ms = (INITIAL_DELAY_MS * 2u64.pow(retries))
                    .min(MAX_TOTAL_DELAY_MS.saturating_sub(total_delay_ms));
                thread::sleep(Duration::from_millis(delay_ms));
                total_delay_ms += delay_ms;
                retries += 1;
                temp_file = persist_error.file;
            }
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn atomic_rename(temp_file: NamedTempFile, target: &Path) -> std::io::Result<()> {
    temp_file.persist(target).map(|_| ()).map_err(|e| e.error)
}

#[cfg(unix)]
fn is_cross_filesystem_error(err: &std::io::Error) -> bool {
    err.raw_os_error() == Some(18) // EXDEV
}

#[cfg(windows)]
fn is_cross_filesystem_error(_err: &std::io::Error) -> bool {
    false
}

fn cross_filesystem_copy(temp_path: &Path, target: &Utf8Path) -> std::io::Result<()> {
    let content = fs::read(temp_path)?;
    let target_dir = target.parent().unwrap_or_else(|| Utf8Path::new("."));
    let mut target_temp = NamedTempFile::new_in(target_dir)?;
    target_temp.write_all(&content)?;
    target_temp.as_file().sync_all()?;
    target_temp.persist(target.as_std_path()).map(|_| ()).map_err(|e| e.error)
}
