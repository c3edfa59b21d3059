//! Shared rendering for the three output modes.

use std::io::Write;

use edgectl_client::shared::Timestamps;
use serde::Serialize;

use crate::EdgeResult;

/// How a `list` or `describe` command renders what it fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Column summary; the default
    Table,
    /// The raw API objects
    Json,
    /// Every field, one per line
    Verbose,
}

impl OutputMode {
    /// `--verbose` wins over the table default. `--json` together with
    /// `--verbose` is rejected by `Session::output_mode`.
    pub const fn select(verbose: bool, json: bool) -> OutputMode {
        match (verbose, json) {
            (_, true) => OutputMode::Json,
            (true, false) => OutputMode::Verbose,
            (false, false) => OutputMode::Table,
        }
    }
}

pub fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> EdgeResult<()> {
    let data = serde_json::to_string_pretty(value)?;
    writeln!(out, "{data}")?;
    Ok(())
}

/// Writes the created/updated/deleted lines that are present, each
/// prefixed by `indent`.
pub fn write_timestamps(out: &mut dyn Write, indent: &str, timestamps: &Timestamps) -> EdgeResult<()> {
    let stamps: [(&str, &Option<String>); 3] = [
        ("Created at", &timestamps.created_at),
        ("Updated at", &timestamps.updated_at),
        ("Deleted at", &timestamps.deleted_at),
    ];
    for (label, value) in stamps {
        if let Some(value) = value {
            writeln!(out, "{indent}{label}: {value}")?;
        }
    }
    Ok(())
}

/// Renders an optional field the way verbose output shows a missing value.
pub fn or_empty<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}
