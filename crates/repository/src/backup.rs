//! Snapshot and restore of a source tree around an in-place rewrite.

use crate::error::{RepositoryError, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Directories left out of a backup by default
pub const DEFAULT_BACKUP_EXCLUDES: &[&str] = &["api", "sample", "test"];

/// Replace `dest` with a copy of `src`, skipping top-level `excluded` directories.
///
/// Returns the number of files copied.
pub fn backup_sources(src: &Path, dest: &Path, excluded: &[&str]) -> Result<usize> {
    if dest.starts_with(src) {
        return Err(RepositoryError::InvalidPath(format!(
            "backup directory {} is inside {}",
            dest.display(),
            src.display()
        )));
    }
    if dest.exists() {
        fs::remove_dir_all(dest)?;
    }
    fs::create_dir_all(dest)?;

    let walker = WalkDir::new(src)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() != 1
                || !entry.file_type().is_dir()
                || !excluded
                    .iter()
                    .any(|name| entry.file_name().to_str() == Some(*name))
        });
    let copied = copy_entries(walker, src, dest)?;
    log::info!(
        "Backed up {} files from {} to {}",
        copied,
        src.display(),
        dest.display()
    );
    Ok(copied)
}

/// Copy every file of `backup` over `dest`, keeping files only present in `dest`.
///
/// Returns the number of files restored.
pub fn restore_sources(backup: &Path, dest: &Path) -> Result<usize> {
    let walker = WalkDir::new(backup).sort_by_file_name().into_iter();
    let restored = copy_entries(walker, backup, dest)?;
    log::info!(
        "Restored {} files from {} to {}",
        restored,
        backup.display(),
        dest.display()
    );
    Ok(restored)
}

fn copy_entries<I>(entries: I, from: &Path, to: &Path) -> Result<usize>
where
    I: Iterator<Item = walkdir::Result<walkdir::DirEntry>>,
{
    let mut copied = 0;
    for entry in entries {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(from) else {
            continue;
        };
        let target = to.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
