use std::path::Path;

use tracing::{debug, warn};

use crate::config::Config;
use crate::cwd::path_to_record;
use crate::entry::Entry;
use crate::error::{Result, ZdirError};
use crate::exclude::ExcludeList;
use crate::store::Store;

#[derive(Debug, Clone, PartialEq)]
pub enum VisitOutcome {
    Recorded(Entry),
    Excluded,
}

/// Receives working-directory change events from the host shell integration.
pub trait DirectoryObserver {
    /// `path` is absolute and already resolved the way the user configured.
    fn on_directory_changed(&self, path: &Path) -> Result<VisitOutcome>;
}

/// Records visits into a [`Store`], skipping excluded directories.
#[derive(Debug, Clone)]
pub struct VisitRecorder<'a> {
    store: Store<'a>,
    exclude: ExcludeList,
}

impl<'a> VisitRecorder<'a> {
    pub fn new(config: &'a Config) -> Result<Self> {
        Ok(Self {
            store: Store::new(config)?,
            exclude: ExcludeList::new(&config.exclude_dirs)?,
        })
    }
}

impl DirectoryObserver for VisitRecorder<'_> {
    fn on_directory_changed(&self, path: &Path) -> Result<VisitOutcome> {
        if !path.is_absolute() {
            return Err(ZdirError::InvalidPath(format!(
                "visit path must be absolute: {}",
                path.display()
            )));
        }
        if self.exclude.is_excluded(path) {
            debug!(path = %path.display(), "visit excluded");
            return Ok(VisitOutcome::Excluded);
        }
        let record = path_to_record(path)?;
        self.store.record_visit(&record).map(VisitOutcome::Recorded)
    }
}

/// Delivers a visit without ever failing the caller: a lost visit must not
/// block the directory change that produced it.
pub fn notify_best_effort(observer: &dyn DirectoryObserver, path: &Path) -> Option<VisitOutcome> {
    match observer.on_directory_changed(path) {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            warn!(
                path = %path.display(),
                code = err.code(),
                error = %err,
                "failed to record directory visit"
            );
            None
        }
    }
}
