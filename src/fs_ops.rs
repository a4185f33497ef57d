//! Filesystem placement helpers for custom-install steps.
//!
//! Installed material lives at fixed paths under the install root. Every
//! placement here replaces its destination wholesale so re-running an install
//! converges on the same tree whatever was there before.

use anyhow::{Context, Result};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Replace `dest` with a recursive copy of `src`.
///
/// An existing `dest` (directory or file) is removed first, so `dest` never
/// holds a mix of old and new files. Permissions are copied along with
/// contents.
pub fn replace_dir(src: &Path, dest: &Path) -> Result<()> {
    remove_if_exists(dest)?;
    copy_dir_recursive(src, dest)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dest.display()))?;
    Ok(())
}

/// Copy one file to `dest`, overwriting any existing file.
pub fn replace_file(src: &Path, dest: &Path) -> Result<()> {
    if dest.is_dir() {
        fs::remove_dir_all(dest)
            .with_context(|| format!("Failed to remove directory {}", dest.display()))?;
    }
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::copy(src, dest)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dest.display()))?;
    Ok(())
}

/// Remove a file or directory tree if present.
pub fn remove_if_exists(path: &Path) -> Result<()> {
    let Ok(metadata) = fs::symlink_metadata(path) else {
        return Ok(());
    };
    if metadata.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove existing {}", path.display()))?;
    } else {
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove existing {}", path.display()))?;
    }
    Ok(())
}

/// chmod to a fixed octal mode.
pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .with_context(|| format!("Failed to chmod {:o} {}", mode, path.display()))
}

/// Set `dir_mode` on `dir` and `file_mode` on every file directly inside it.
pub fn set_tree_modes(dir: &Path, dir_mode: u32, file_mode: u32) -> Result<()> {
    set_mode(dir, dir_mode)?;
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() {
            set_mode(&path, file_mode)?;
        }
    }
    Ok(())
}

/// Log the contents of an installed directory for the operator.
pub fn log_dir_contents(path: &Path) {
    for entry in WalkDir::new(path)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let mode = entry
            .metadata()
            .map(|m| format!("{:o}", m.permissions().mode() & 0o7777))
            .unwrap_or_default();
        debug!(path = %entry.path().display(), mode = %mode, "installed");
    }
}

fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src)?;
        let target = dest.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target)?;
            let mode = entry.metadata()?.permissions().mode();
            fs::set_permissions(&target, fs::Permissions::from_mode(mode))?;
        } else if file_type.is_symlink() {
            let link = fs::read_link(entry.path())?;
            std::os::unix::fs::symlink(link, &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
