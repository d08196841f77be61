use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use zdir_core::{Action, QueryOptions, SortOrder};


/// Tracks your most used directories, based on 'frecency'.
///
/// After a short learning phase, zdir takes you to the most frecent directory
/// that matches ALL of the regexes given on the command line, in order.
/// For example, `zdir foo bar` matches /foo/bar but not /bar/foo.
#[derive(Debug, Parser)]
#[command(name = "zdir")]
#[command(about = "Jump to your most frecent directories", version)]
#[command(group(ArgGroup::new("action").args(["echo", "list", "remove", "add"])))]
#[command(group(ArgGroup::new("ordering").args(["rank", "time"])))]
pub struct Cli {
    /// Regexes that must match the directory path, left to right.
    #[arg(
        value_name = "REGEX",
        required_unless_present_any = ["remove", "add"],
        conflicts_with = "add"
    )]
    pub patterns: Vec<String>,

    /// Restrict matches to subdirectories of the current directory.
    #[arg(short = 'c')]
    pub subdir_only: bool,

    /// Echo the best match, don't cd.
    #[arg(short = 'e')]
    pub echo: bool,

    /// List all matches, best first.
    #[arg(short = 'l')]
    pub list: bool,

    /// Remove the current directory from the data file.
    #[arg(short = 'x')]
    pub remove: bool,

    /// Match by rank only.
    #[arg(short = 'r')]
    pub rank: bool,

    /// Match by recent access only.
    #[arg(short = 't')]
    pub time: bool,

    /// Emit the list as JSON with each entry's sort key.
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Record a visit to PATH (for shell hooks); never fails the caller.
    #[arg(
        long,
        value_name = "PATH",
        conflicts_with_all = ["subdir_only", "rank", "time", "json"]
    )]
    pub add: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub const fn action(&self) -> Action {
        if self.echo {
            Action::Echo
        } else if self.list {
            Action::List
        } else if self.remove {
            Action::Remove
        } else {
            Action::Cd
        }
    }

    #[must_use]
    pub const fn order(&self) -> SortOrder {
        if self.rank {
            SortOrder::Rank
        } else if self.time {
            SortOrder::Time
        } else {
            SortOrder::Frecency
        }
    }

    #[must_use]
    pub const fn query_options(&self) -> QueryOptions {
        QueryOptions {
            subdir_only: self.subdir_only,
            order: self.order(),
            action: self.action(),
        }
    }
}
