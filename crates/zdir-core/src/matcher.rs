use regex::Regex;

use crate::error::{Result, ZdirError};

/// Ordered regex fragments, compiled once per query.
///
/// Each fragment must match somewhere after the end of the previous
/// fragment's leftmost match, so `foo bar` accepts `/foo/bar` but not
/// `/bar/foo`. An empty set accepts every path.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    pub fn compile<I, S>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = raw
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(pattern).map_err(|source| ZdirError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let mut rest = path;
        for pattern in &self.patterns {
            let Some(found) = pattern.find(rest) else {
                return false;
            };
            rest = &rest[found.end()..];
        }
        true
    }
}
