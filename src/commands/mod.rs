//! CLI commands - print repository data as JSON

pub mod ids;
pub mod list;
pub mod show;

use anyhow::Result;
use serde::Serialize;
use std::io::Write;

/// Write `value` as JSON followed by a newline
fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T, compact: bool) -> Result<()> {
    if compact {
        serde_json::to_writer(&mut *out, value)?;
    } else {
        serde_json::to_writer_pretty(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
