use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{Result, ZdirError};

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Directories whose visits are never recorded. Plain entries exclude their
/// whole subtree; entries with glob syntax are matched as patterns.
#[derive(Debug, Clone)]
pub struct ExcludeList {
    dirs: Vec<PathBuf>,
    globs: GlobSet,
}

impl ExcludeList {
    pub fn new(entries: &[PathBuf]) -> Result<Self> {
        let mut dirs = Vec::new();
        let mut builder = GlobSetBuilder::new();
        for entry in entries {
            let raw = entry.to_string_lossy();
            if raw.contains(GLOB_META) {
                let glob = Glob::new(&raw).map_err(|err| {
                    ZdirError::Config(format!("invalid exclude pattern '{raw}': {err}"))
                })?;
                builder.add(glob);
            } else {
                dirs.push(entry.clone());
            }
        }
        let globs = builder
            .build()
            .map_err(|err| ZdirError::Config(format!("invalid exclude patterns: {err}")))?;
        Ok(Self { dirs, globs })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.globs.is_empty()
    }

    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.dirs.iter().any(|dir| path.starts_with(dir)) || self.globs.is_match(path)
    }
}
