use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::config::Config;
use crate::error::{Result, ZdirError};

/// Removes `.` components and folds `..` into its parent without touching
/// the filesystem.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Absolute form of a path about to be recorded.
pub fn resolve_visit_path(path: &Path, resolve_symlinks: bool) -> Result<PathBuf> {
    if resolve_symlinks {
        return Ok(fs::canonicalize(path)?);
    }
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(normalize_lexically(&absolute))
}

/// The working directory as queries see it. Without symlink resolution the
/// shell's logical `pwd_hint` (usually `$PWD`) wins when it names the same
/// directory as the process working directory.
pub fn resolve_current_dir(config: &Config, pwd_hint: Option<&Path>) -> Result<PathBuf> {
    let physical = std::env::current_dir()?;
    if config.resolve_symlinks {
        return Ok(fs::canonicalize(&physical)?);
    }
    if let Some(logical) = pwd_hint.filter(|hint| hint.is_absolute())
        && same_directory(logical, &physical)
    {
        return Ok(normalize_lexically(logical));
    }
    Ok(normalize_lexically(&physical))
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Paths are stored as UTF-8 text.
pub fn path_to_record(path: &Path) -> Result<String> {
    path.to_str()
        .map(ToString::to_string)
        .ok_or_else(|| ZdirError::InvalidPath(format!("not valid UTF-8: {}", path.display())))
}
