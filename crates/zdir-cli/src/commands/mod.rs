use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use zdir_core::cwd::{resolve_current_dir, resolve_visit_path};
use zdir_core::{Config, QueryEngine, VisitRecorder, notify_best_effort};

use crate::cli::Cli;

mod support;

#[cfg(test)]
mod tests;

use self::support::write_selection;

pub(crate) fn run(cli: &Cli, config: &Config) -> Result<()> {
    if let Some(path) = &cli.add {
        record_visit(config, path);
        return Ok(());
    }

    let pwd_hint = std::env::var_os("PWD").map(PathBuf::from);
    let cwd = resolve_current_dir(config, pwd_hint.as_deref())
        .context("failed to resolve current directory")?;
    let engine = QueryEngine::new(config)?;
    let selection = engine.query(&cli.patterns, cli.query_options(), &cwd)?;

    let mut stdout = io::stdout().lock();
    write_selection(&mut stdout, &selection, cli.json)
}

/// Hook entry point: every failure is logged and swallowed so the shell's
/// directory change is never affected.
fn record_visit(config: &Config, path: &Path) {
    let resolved = match resolve_visit_path(path, config.resolve_symlinks) {
        Ok(resolved) => resolved,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot resolve visited directory");
            return;
        }
    };
    let recorder = match VisitRecorder::new(config) {
        Ok(recorder) => recorder,
        Err(err) => {
            warn!(code = err.code(), error = %err, "cannot open data file for recording");
            return;
        }
    };
    let outcome = notify_best_effort(&recorder, &resolved);
    debug!(path = %resolved.display(), outcome = ?outcome, "visit hook finished");
}
