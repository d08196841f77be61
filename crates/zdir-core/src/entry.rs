use chrono::{DateTime, Utc};
use serde::Serialize;

/// Ranks below this floor are dropped the next time the store is loaded.
pub const RANK_FLOOR: f64 = 1.0;

/// One remembered directory. Values are immutable; visits produce a new entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    path: String,
    rank: f64,
    last_access: DateTime<Utc>,
}

impl Entry {
    pub fn new(path: impl Into<String>, rank: f64, last_access: DateTime<Utc>) -> Self {
        Self {
            path: path.into(),
            rank,
            last_access,
        }
    }

    pub fn first_visit(path: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::new(path, 1.0, now)
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn rank(&self) -> f64 {
        self.rank
    }

    #[must_use]
    pub const fn last_access(&self) -> DateTime<Utc> {
        self.last_access
    }

    #[must_use]
    pub fn visited(&self, now: DateTime<Utc>) -> Self {
        Self::new(self.path.clone(), self.rank + 1.0, now)
    }

    #[must_use]
    pub fn with_rank(&self, rank: f64) -> Self {
        Self::new(self.path.clone(), rank, self.last_access)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.rank < RANK_FLOOR
    }
}
