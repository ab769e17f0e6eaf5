//! Atomic replacement of the generated output file.
//!
//! Content is written to `.{filename}.tmp` next to the target, synced, and
//! renamed over the target. A failed run therefore leaves either the previous
//! output or no output, never a truncated one. On a crash the temporary file
//! may remain and is overwritten by the next run.
//!
//! When the target is a symlink, the file it points to is replaced and the
//! link itself is kept.

use crate::error::{PrepError, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Atomically replace `path` with `content`, creating parent directories.
///
/// All failures are reported as [`PrepError::OutputUnwritable`].
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let requested = path.as_ref();
    let unwritable = |reason: String| PrepError::OutputUnwritable {
        path: requested.to_path_buf(),
        reason,
    };
    let resolved = resolve_symlink(requested);
    let path = resolved.as_path();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            unwritable(format!(
                "failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path).ok_or_else(|| unwritable("invalid file path".to_string()))?;

    if let Err(reason) = write_and_sync(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(unwritable(reason));
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(unwritable(format!("failed to replace file: {}", e)));
    }

    // Persist the directory entry; opening a directory fails on Windows.
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Ok(dir) = File::open(parent.unwrap_or(Path::new("."))) {
        let _ = dir.sync_all();
    }

    Ok(())
}

/// Final target of `path` if it is a symlink, otherwise `path` itself.
///
/// A dangling link resolves to the path it names, relative to the link.
fn resolve_symlink(path: &Path) -> PathBuf {
    let is_symlink = fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    if !is_symlink {
        return path.to_path_buf();
    }

    if let Ok(target) = fs::canonicalize(path) {
        return target;
    }
    match fs::read_link(path) {
        Ok(target) => match path.parent() {
            Some(parent) => parent.join(target),
            None => target,
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Temporary sibling path: `.{filename}.tmp`.
fn temp_path_for(target: &Path) -> Option<PathBuf> {
    let filename = target.file_name()?.to_str()?;
    let temp_name = format!(".{}.tmp", filename);
    Some(match target.parent() {
        Some(parent) => parent.join(temp_name),
        None => PathBuf::from(temp_name),
    })
}

fn write_and_sync(path: &Path, content: &[u8]) -> std::result::Result<(), String> {
    let file = File::create(path)
        .map_err(|e| format!("failed to create temporary file '{}': {}", path.display(), e))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(content)
        .map_err(|e| format!("failed to write temporary file: {}", e))?;

    let file = writer
        .into_inner()
        .map_err(|e| format!("failed to flush temporary file: {}", e.error()))?;
    file.sync_all()
        .map_err(|e| format!("failed to sync temporary file to disk: {}", e))
}
