//! Human-readable dump of a table, one block per record.

use crate::models::Table;
use crate::utils::truncate_chars;
use std::io::{self, Write};

/// Values longer than this many characters are cut and suffixed with `...`.
pub const PREVIEW_CHARS: usize = 500;

/// Print every row of `table` as a `Record N:` block of `name: value` lines.
///
/// Each value is cut to [`PREVIEW_CHARS`] characters. An empty table prints
/// `(none)` under the heading.
///
/// # Arguments
///
/// * `table` - Rows to show, normally the unfinalized accumulator snapshot
/// * `out` - Destination, stdout in the binary
///
/// # Returns
///
/// Any error from writing to `out`.
pub fn render<W: Write>(table: &Table, out: &mut W) -> io::Result<()> {
    writeln!(out, "\nScraped records:")?;
    if table.is_empty() {
        writeln!(out, "(none)")?;
    }
    for (idx, row) in table.rows.iter().enumerate() {
        writeln!(out, "\nRecord {}:", idx + 1)?;
        for (name, value) in table.columns.iter().zip(row) {
            writeln!(out, "{}: {}", name, truncate_chars(value, PREVIEW_CHARS, "..."))?;
        }
    }
    Ok(())
}
