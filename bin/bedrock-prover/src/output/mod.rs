//! Output formatting for command results.

pub(crate) mod fault_proofs;
pub(crate) mod proof;
pub(crate) mod resolve_output;

use std::fmt;

use serde::Serialize;

use crate::{
    cli::OutputFormat,
    errors::{DisplayableError, DisplayedError},
};

/// Trait for objects that can be formatted for porcelain output
pub(crate) trait Formattable {
    /// Format for machine-readable output (parseable, stable, human-readable)
    fn format_porcelain(&self) -> String;
}

/// One `key: value` line of porcelain output.
pub(crate) fn porcelain_field(key: &str, value: impl fmt::Display) -> String {
    format!("{key}: {value}")
}

/// Writes `data` to stdout in the requested format.
pub(crate) fn output<T>(data: &T, format: OutputFormat) -> Result<(), DisplayedError>
where
    T: Formattable + Serialize,
{
    let rendered = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(data).internal_error("failed to serialize output")?
        }
        OutputFormat::Porcelain => data.format_porcelain(),
    };
    println!("{rendered}");
    Ok(())
}
