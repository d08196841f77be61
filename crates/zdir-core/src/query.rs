use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::cwd::path_to_record;
use crate::entry::Entry;
use crate::error::{Result, ZdirError};
use crate::matcher::PatternSet;
use crate::score::SortOrder;
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// Select the best match for the host shell to change into.
    #[default]
    Cd,
    Echo,
    List,
    /// Forget the current directory; patterns are ignored.
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryOptions {
    pub subdir_only: bool,
    pub order: SortOrder,
    pub action: Action,
}

/// A surviving candidate together with its sort key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    #[serde(flatten)]
    pub entry: Entry,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    ChangeDirectory(String),
    Echo(String),
    List(Vec<RankedEntry>),
    Removed { path: String, existed: bool },
}

#[derive(Debug, Clone)]
pub struct QueryEngine<'a> {
    store: Store<'a>,
}

impl<'a> QueryEngine<'a> {
    pub fn new(config: &'a Config) -> Result<Self> {
        Ok(Self {
            store: Store::new(config)?,
        })
    }

    #[must_use]
    pub const fn store(&self) -> &Store<'a> {
        &self.store
    }

    pub fn query(
        &self,
        patterns: &[String],
        options: QueryOptions,
        cwd: &Path,
    ) -> Result<Selection> {
        self.query_at(patterns, options, cwd, Utc::now())
    }

    pub fn query_at(
        &self,
        patterns: &[String],
        options: QueryOptions,
        cwd: &Path,
        now: DateTime<Utc>,
    ) -> Result<Selection> {
        match options.action {
            Action::Remove => {
                let path = path_to_record(cwd)?;
                let existed = self.store.remove(&path)?;
                Ok(Selection::Removed { path, existed })
            }
            Action::List => Ok(Selection::List(self.rank(patterns, options, cwd, now)?)),
            Action::Cd | Action::Echo => {
                let best = self
                    .rank(patterns, options, cwd, now)?
                    .into_iter()
                    .next()
                    .ok_or(ZdirError::NoMatches)?;
                let path = best.entry.path().to_string();
                if options.action == Action::Cd {
                    Ok(Selection::ChangeDirectory(path))
                } else {
                    Ok(Selection::Echo(path))
                }
            }
        }
    }

    /// Load, restrict to `cwd`'s subtree if asked, sort, then keep entries
    /// whose path satisfies every pattern in order.
    pub fn rank(
        &self,
        patterns: &[String],
        options: QueryOptions,
        cwd: &Path,
        now: DateTime<Utc>,
    ) -> Result<Vec<RankedEntry>> {
        let mut entries = self.store.load_all()?;
        let loaded = entries.len();
        if options.subdir_only {
            entries.retain(|entry| Path::new(entry.path()).starts_with(cwd));
        }
        options.order.sort(&mut entries, now);

        let patterns = PatternSet::compile(patterns)?;
        let ranked: Vec<RankedEntry> = entries
            .into_iter()
            .filter(|entry| patterns.matches(entry.path()))
            .map(|entry| RankedEntry {
                score: options.order.score(&entry, now),
                entry,
            })
            .collect();
        debug!(
            loaded,
            matched = ranked.len(),
            order = %options.order,
            subdir_only = options.subdir_only,
            "ranked candidates"
        );
        Ok(ranked)
    }
}
