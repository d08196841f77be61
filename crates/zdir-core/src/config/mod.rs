use std::path::{Path, PathBuf};

use crate::error::{Result, ZdirError};

mod env;
mod file;

pub use env::{CONFIG_FILE_ENV, DATA_ENV, EXCLUDE_DIRS_ENV, NO_RESOLVE_SYMLINKS_ENV, OWNER_ENV};
pub use file::FileConfig;

const DEFAULT_DATA_FILE_NAME: &str = ".z";
const CONFIG_DIR_NAME: &str = "zdir";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Runtime settings, built once at startup and lent to the store and the
/// query engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    /// `user`, `user:group`, or numeric `uid[:gid]` applied to each write.
    pub owner: Option<String>,
    pub resolve_symlinks: bool,
    pub exclude_dirs: Vec<PathBuf>,
}

impl Config {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            owner: None,
            resolve_symlinks: true,
            exclude_dirs: Vec::new(),
        }
    }

    /// Defaults, then the optional config file, then process environment.
    pub fn load() -> Result<Self> {
        let lookup = |name: &str| std::env::var(name).ok();
        let file = match config_file_path(&lookup) {
            Some(path) => FileConfig::read(&path)?,
            None => None,
        };
        Self::resolve(file.unwrap_or_default(), dirs::home_dir().as_deref(), &lookup)
    }

    /// Layers `file` and `lookup` over the defaults without touching the
    /// process environment.
    pub fn resolve<F>(file: FileConfig, home: Option<&Path>, lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_file = match env::read_non_empty(lookup, DATA_ENV).map(PathBuf::from) {
            Some(path) => path,
            None => match file.data_file {
                Some(path) => path,
                None => home
                    .map(|home| home.join(DEFAULT_DATA_FILE_NAME))
                    .ok_or_else(|| {
                        ZdirError::Config(format!(
                            "cannot locate home directory; set {DATA_ENV}"
                        ))
                    })?,
            },
        };

        let owner = env::read_non_empty(lookup, OWNER_ENV).or(file.owner);

        let resolve_symlinks =
            match env::parse_flag(lookup(NO_RESOLVE_SYMLINKS_ENV).as_deref()) {
                Some(no_resolve) => !no_resolve,
                None => file.resolve_symlinks.unwrap_or(true),
            };

        let exclude_dirs = match env::read_non_empty(lookup, EXCLUDE_DIRS_ENV) {
            Some(raw) => env::split_dir_list(&raw),
            None => file.exclude_dirs.unwrap_or_default(),
        };

        Ok(Self {
            data_file,
            owner,
            resolve_symlinks,
            exclude_dirs,
        })
    }
}

fn config_file_path<F>(lookup: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = env::read_non_empty(lookup, CONFIG_FILE_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|base| base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
