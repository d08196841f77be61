use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::Config;
use crate::entry::Entry;
use crate::error::{Result, ZdirError};
use crate::owner::{OwnerSpec, apply_owner};
use crate::table::{parse_table, render_table, validate_record_path};

/// Above this many entries every save scales all ranks down once.
pub const GROOM_THRESHOLD: usize = 9000;
pub const GROOM_LEVEL: f64 = 0.99;

/// Size-triggered compaction: when the store holds more than
/// [`GROOM_THRESHOLD`] entries, each rank is scaled by [`GROOM_LEVEL`] and
/// truncated toward zero. Entries that fall below rank 1 are written as-is
/// and dropped by the next load.
#[must_use]
pub fn groom(entries: Vec<Entry>) -> Vec<Entry> {
    if entries.len() <= GROOM_THRESHOLD {
        return entries;
    }
    debug!(entries = entries.len(), level = GROOM_LEVEL, "grooming data file");
    entries
        .into_iter()
        .map(|entry| entry.with_rank((entry.rank() * GROOM_LEVEL).trunc()))
        .collect()
}

/// Persistent path -> (rank, last access) table backed by one flat file.
///
/// Every mutation rewrites the whole file through a temporary sibling that
/// atomically replaces the target, so concurrent readers observe either the
/// previous or the next version. There is no locking: concurrent writers race
/// and the last one wins.
#[derive(Debug, Clone)]
pub struct Store<'a> {
    config: &'a Config,
    owner: Option<OwnerSpec>,
}

impl<'a> Store<'a> {
    pub fn new(config: &'a Config) -> Result<Self> {
        let owner = config
            .owner
            .as_deref()
            .map(str::parse::<OwnerSpec>)
            .transpose()?;
        Ok(Self { config, owner })
    }

    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.config.data_file
    }

    pub fn load_all(&self) -> Result<Vec<Entry>> {
        let path = self.data_file();
        let raw = match fs::read(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "data file absent; starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(ZdirError::Io(err)),
        };
        let entries = parse_table(&raw, &path.display().to_string())?;
        debug!(path = %path.display(), entries = entries.len(), "loaded data file");
        Ok(entries)
    }

    /// Writes `entries` in the given order, grooming first when oversized.
    pub fn save_all(&self, entries: Vec<Entry>) -> Result<()> {
        let entries = groom(entries);
        let content = render_table(&entries);
        self.write_atomic(&content)?;
        debug!(
            path = %self.data_file().display(),
            entries = entries.len(),
            "saved data file"
        );
        Ok(())
    }

    pub fn record_visit(&self, path: &str) -> Result<Entry> {
        self.record_visit_at(path, Utc::now())
    }

    /// Bumps `path` (or creates it at rank 1) and rewrites the store.
    pub fn record_visit_at(&self, path: &str, now: DateTime<Utc>) -> Result<Entry> {
        validate_record_path(path)?;
        let mut entries = self.load_all()?;
        let visited = match entries.iter_mut().find(|entry| entry.path() == path) {
            Some(existing) => {
                *existing = existing.visited(now);
                existing.clone()
            }
            None => {
                let fresh = Entry::first_visit(path, now);
                entries.push(fresh.clone());
                fresh
            }
        };
        self.save_all(entries)?;
        debug!(path, rank = visited.rank(), "recorded visit");
        Ok(visited)
    }

    /// Drops the first entry for `path`; returns whether one existed. The
    /// store is rewritten either way.
    pub fn remove(&self, path: &str) -> Result<bool> {
        let mut entries = self.load_all()?;
        let position = entries.iter().position(|entry| entry.path() == path);
        if let Some(index) = position {
            entries.remove(index);
        }
        self.save_all(entries)?;
        debug!(path, removed = position.is_some(), "removed entry");
        Ok(position.is_some())
    }

    fn write_atomic(&self, content: &str) -> Result<()> {
        let target = self.data_file();
        let parent = parent_dir(target);
        fs::create_dir_all(&parent).map_err(|err| ZdirError::persistence(target, err))?;

        let file_name = target
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                ZdirError::InvalidPath(format!("invalid data file name: {}", target.display()))
            })?;
        let tmp_path = parent.join(format!(
            ".{file_name}.zdir.tmp.{}",
            uuid::Uuid::new_v4().simple()
        ));

        if let Err(err) = self.write_temp(&tmp_path, target, content) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err);
        }

        if let Err(err) = replace_file(&tmp_path, target) {
            let _ = fs::remove_file(&tmp_path);
            return Err(ZdirError::persistence(target, err));
        }

        if let Ok(dir) = fs::File::open(&parent) {
            let _ = dir.sync_all();
        }
        Ok(())
    }

    fn write_temp(&self, tmp_path: &Path, target: &Path, content: &str) -> Result<()> {
        let persist = |err: std::io::Error| ZdirError::persistence(target, err);
        {
            let mut tmp = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(tmp_path)
                .map_err(persist)?;
            tmp.write_all(content.as_bytes()).map_err(persist)?;
            tmp.sync_all().map_err(persist)?;
        }
        if let Ok(existing) = fs::metadata(target) {
            fs::set_permissions(tmp_path, existing.permissions()).map_err(persist)?;
        }
        if let Some(owner) = &self.owner {
            apply_owner(tmp_path, owner)?;
        }
        Ok(())
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Rename over the target; where the platform refuses to overwrite by
/// rename, delete the target and copy instead.
fn replace_file(from: &Path, to: &Path) -> std::io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(err) if rename_cannot_overwrite(&err) => {
            debug!(path = %to.display(), "rename refused to overwrite; copying");
            match fs::remove_file(to) {
                Ok(()) => {}
                Err(remove_err) if remove_err.kind() == ErrorKind::NotFound => {}
                Err(remove_err) => return Err(remove_err),
            }
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        Err(err) => Err(err),
    }
}

fn rename_cannot_overwrite(err: &std::io::Error) -> bool {
    err.kind() == ErrorKind::AlreadyExists
        || (cfg!(windows) && err.kind() == ErrorKind::PermissionDenied)
}
