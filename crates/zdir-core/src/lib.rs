// Public fallible APIs in this crate share one concrete error contract (`ZdirError`).
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod config;
pub mod cwd;
pub mod entry;
pub mod error;
pub mod exclude;
pub mod hook;
pub mod matcher;
pub(crate) mod owner;
pub mod query;
pub mod score;
pub mod store;
pub mod table;

pub use config::Config;
pub use entry::Entry;
pub use error::{Result, ZdirError};
pub use hook::{DirectoryObserver, VisitOutcome, VisitRecorder, notify_best_effort};
pub use matcher::PatternSet;
pub use query::{Action, QueryEngine, QueryOptions, RankedEntry, Selection};
pub use score::{SortOrder, frecency};
pub use store::Store;
