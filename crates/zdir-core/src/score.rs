use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

use crate::entry::Entry;

const RECENT_HOUR_FACTOR: f64 = 4.0;
const RECENT_DAY_FACTOR: f64 = 2.0;
const RECENT_WEEK_FACTOR: f64 = 0.5;
const STALE_FACTOR: f64 = 0.25;

/// Tiered frequency/recency blend. Future timestamps count as age zero.
#[must_use]
pub fn frecency(entry: &Entry, now: DateTime<Utc>) -> f64 {
    let age = now - entry.last_access();
    let factor = if age < TimeDelta::hours(1) {
        RECENT_HOUR_FACTOR
    } else if age < TimeDelta::days(1) {
        RECENT_DAY_FACTOR
    } else if age < TimeDelta::weeks(1) {
        RECENT_WEEK_FACTOR
    } else {
        STALE_FACTOR
    };
    entry.rank() * factor
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Frecency,
    Rank,
    Time,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Frecency => "frecency",
            Self::Rank => "rank",
            Self::Time => "time",
        }
    }

    /// Sort key of `entry` under this ordering; `Time` yields epoch seconds.
    #[must_use]
    pub fn score(self, entry: &Entry, now: DateTime<Utc>) -> f64 {
        match self {
            Self::Frecency => frecency(entry, now),
            Self::Rank => entry.rank(),
            #[allow(clippy::cast_precision_loss, reason = "epoch seconds fit in f64 mantissa")]
            Self::Time => entry.last_access().timestamp() as f64,
        }
    }

    /// Descending comparison: the better candidate orders first.
    #[must_use]
    pub fn compare(self, a: &Entry, b: &Entry, now: DateTime<Utc>) -> Ordering {
        match self {
            Self::Frecency => frecency(b, now).total_cmp(&frecency(a, now)),
            Self::Rank => b.rank().total_cmp(&a.rank()),
            Self::Time => b.last_access().cmp(&a.last_access()),
        }
    }

    /// Stable sort, best candidate first; ties keep input order.
    pub fn sort(self, entries: &mut [Entry], now: DateTime<Utc>) {
        entries.sort_by(|a, b| self.compare(a, b, now));
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_750_000_000, 0).expect("timestamp")
    }

    fn aged(rank: f64, age: TimeDelta) -> Entry {
        Entry::new("/p", rank, now() - age)
    }

    fn hms(h: i64, m: i64, s: i64) -> TimeDelta {
        TimeDelta::hours(h) + TimeDelta::minutes(m) + TimeDelta::seconds(s)
    }

    #[test]
    fn fresh_entries_are_quadrupled() {
        assert_eq!(frecency(&aged(7.0, TimeDelta::zero()), now()), 28.0);
        assert_eq!(frecency(&aged(1.0, TimeDelta::zero()), now()), 4.0);
    }

    #[test]
    fn hour_boundary_changes_tier() {
        assert_eq!(frecency(&aged(10.0, hms(0, 59, 59)), now()), 40.0);
        assert_eq!(frecency(&aged(10.0, hms(1, 0, 1)), now()), 20.0);
    }

    #[test]
    fn day_boundary_changes_tier() {
        assert_eq!(frecency(&aged(10.0, hms(23, 59, 59)), now()), 20.0);
        assert_eq!(frecency(&aged(10.0, hms(24, 0, 1)), now()), 5.0);
    }

    #[test]
    fn week_boundary_changes_tier() {
        assert_eq!(frecency(&aged(10.0, hms(167, 59, 59)), now()), 5.0);
        assert_eq!(frecency(&aged(10.0, hms(168, 0, 1)), now()), 2.5);
    }

    #[test]
    fn exact_boundary_falls_into_older_tier() {
        assert_eq!(frecency(&aged(10.0, TimeDelta::hours(1)), now()), 20.0);
    }

    #[test]
    fn future_timestamps_count_as_fresh() {
        assert_eq!(frecency(&aged(3.0, TimeDelta::hours(-5)), now()), 12.0);
    }

    #[test]
    fn frecency_prefers_recent_over_heavy_stale() {
        let x = Entry::new("/home/x", 5.0, now() - TimeDelta::minutes(10));
        let y = Entry::new("/home/y", 50.0, now() - TimeDelta::days(10));
        assert_eq!(frecency(&x, now()), 20.0);
        assert_eq!(frecency(&y, now()), 12.5);

        let mut entries = vec![y.clone(), x.clone()];
        SortOrder::Frecency.sort(&mut entries, now());
        assert_eq!(entries[0].path(), "/home/x");

        SortOrder::Rank.sort(&mut entries, now());
        assert_eq!(entries[0].path(), "/home/y");
    }

    #[test]
    fn time_order_puts_most_recent_first() {
        let mut entries = vec![
            Entry::new("/old", 9.0, now() - TimeDelta::days(3)),
            Entry::new("/new", 1.0, now() - TimeDelta::seconds(5)),
            Entry::new("/mid", 4.0, now() - TimeDelta::hours(2)),
        ];
        SortOrder::Time.sort(&mut entries, now());
        let order: Vec<&str> = entries.iter().map(Entry::path).collect();
        assert_eq!(order, vec!["/new", "/mid", "/old"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut entries = vec![
            Entry::new("/first", 2.0, now()),
            Entry::new("/second", 2.0, now()),
            Entry::new("/third", 2.0, now()),
        ];
        SortOrder::Rank.sort(&mut entries, now());
        let order: Vec<&str> = entries.iter().map(Entry::path).collect();
        assert_eq!(order, vec!["/first", "/second", "/third"]);
    }

    #[test]
    fn default_order_is_frecency() {
        assert_eq!(SortOrder::default(), SortOrder::Frecency);
        assert_eq!(SortOrder::Time.to_string(), "time");
    }
}
