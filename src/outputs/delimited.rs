//! Delimited-text sink.
//!
//! The table is encoded in memory with the `csv` crate (header row first, then
//! one row per record, schema column order) and written in one go. Existing
//! files are overwritten. A failed write can leave a truncated file behind.

use crate::error::SinkError;
use crate::models::Table;
use crate::utils::ensure_parent_dir;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Encode `table` as delimited text.
///
/// Fields containing the delimiter, quotes or newlines are quoted.
///
/// # Arguments
///
/// * `table` - Header and rows to encode
/// * `delimiter` - Single-byte field separator
///
/// # Returns
///
/// The encoded bytes, header row first.
pub fn encode_table(table: &Table, delimiter: u8) -> Result<Vec<u8>, SinkError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| SinkError::Csv(csv::Error::from(e.into_error())))
}

/// Write `table` to `path`, creating parent directories as needed.
#[instrument(level = "info", skip(table), fields(path = %path.display(), rows = table.len()))]
pub async fn write_table(table: &Table, path: &Path, delimiter: u8) -> Result<(), SinkError> {
    let bytes = encode_table(table, delimiter)?;

    let io_err = |source| SinkError::Io {
        path: path.display().to_string(),
        source,
    };
    ensure_parent_dir(path).await.map_err(io_err)?;
    fs::write(path, bytes).await.map_err(io_err)?;

    info!("Saved table");
    Ok(())
}
