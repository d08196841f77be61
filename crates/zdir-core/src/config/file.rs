use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, ZdirError};

/// Optional on-disk settings; every key may be omitted.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub resolve_symlinks: Option<bool>,
    #[serde(default)]
    pub exclude_dirs: Option<Vec<PathBuf>>,
}

impl FileConfig {
    /// Reads `path`; a missing file yields `None`.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(ZdirError::Io(err)),
        };
        let parsed = toml::from_str::<Self>(&raw).map_err(|err| {
            ZdirError::Config(format!("failed to parse {}: {err}", path.display()))
        })?;
        Ok(Some(parsed))
    }
}
