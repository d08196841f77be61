mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use tracing::warn;
use zdir_core::{Config, ZdirError};

use crate::cli::Cli;

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) if cli.add.is_some() => {
            warn!(code = err.code(), error = %err, "cannot load configuration; visit not recorded");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            return report(&anyhow::Error::new(err).context("failed to load configuration"));
        }
    };

    match commands::run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn report(err: &anyhow::Error) -> ExitCode {
    if err
        .downcast_ref::<ZdirError>()
        .is_some_and(ZdirError::is_no_matches)
    {
        eprintln!("{}", ZdirError::NoMatches);
    } else {
        eprintln!("zdir: {err:#}");
    }
    ExitCode::FAILURE
}
