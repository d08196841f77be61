use thiserror::Error;

pub type Result<T> = std::result::Result<T, ZdirError>;

#[derive(Debug, Error)]
pub enum ZdirError {
    #[error("corrupt data file {path} at line {line}: {reason}")]
    StoreCorrupt {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("No matches found")]
    NoMatches,

    #[error("failed to persist {path}: {source}")]
    Persistence {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot apply owner: {0}")]
    Ownership(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ZdirError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::StoreCorrupt { .. } => "STORE_CORRUPT",
            Self::NoMatches => "NO_MATCHES",
            Self::Persistence { .. } => "PERSISTENCE_FAILURE",
            Self::InvalidPattern { .. } => "INVALID_PATTERN",
            Self::InvalidPath(_) => "INVALID_PATH",
            Self::Config(_) => "INVALID_CONFIG",
            Self::Ownership(_) => "OWNERSHIP_FAILURE",
            Self::Io(_) => "IO_ERROR",
        }
    }

    /// Expected outcomes that are reported to the user without an error chain.
    #[must_use]
    pub const fn is_no_matches(&self) -> bool {
        matches!(self, Self::NoMatches)
    }

    pub(crate) fn persistence(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.display().to_string(),
            source,
        }
    }
}
