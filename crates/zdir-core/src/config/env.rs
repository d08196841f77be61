use std::path::PathBuf;

pub const DATA_ENV: &str = "_Z_DATA";
pub const OWNER_ENV: &str = "_Z_OWNER";
pub const NO_RESOLVE_SYMLINKS_ENV: &str = "_Z_NO_RESOLVE_SYMLINKS";
pub const EXCLUDE_DIRS_ENV: &str = "_Z_EXCLUDE_DIRS";
pub const CONFIG_FILE_ENV: &str = "ZDIR_CONFIG";

#[must_use]
pub(super) fn read_non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// A set flag is on unless it spells out one of the usual "off" tokens.
#[must_use]
pub(super) fn parse_flag(raw: Option<&str>) -> Option<bool> {
    let value = raw?.trim().to_ascii_lowercase();
    if value.is_empty() {
        return None;
    }
    Some(!matches!(value.as_str(), "0" | "false" | "off" | "no" | "none"))
}

#[must_use]
pub(super) fn split_dir_list(raw: &str) -> Vec<PathBuf> {
    std::env::split_paths(raw)
        .filter(|path| !path.as_os_str().is_empty())
        .collect()
}
