use std::io::Write;

use anyhow::Result;
use tracing::info;
use zdir_core::Selection;

pub(super) fn write_selection<W: Write>(
    out: &mut W,
    selection: &Selection,
    json: bool,
) -> Result<()> {
    match selection {
        Selection::ChangeDirectory(path) | Selection::Echo(path) => {
            writeln!(out, "{path}")?;
        }
        Selection::List(ranked) if json => {
            serde_json::to_writer_pretty(&mut *out, ranked)?;
            writeln!(out)?;
        }
        Selection::List(ranked) => {
            for item in ranked {
                writeln!(out, "{}", item.entry.path())?;
            }
        }
        Selection::Removed { path, existed } => {
            info!(path = %path, existed = *existed, "removed current directory");
        }
    }
    out.flush()?;
    Ok(())
}
