//! Snapshot export serialization and file naming.

use crate::snapshot::{Snapshot, SnapshotError};
use chrono::NaiveDate;

/// Serializes a snapshot as indented JSON text.
pub fn export_json(snapshot: &Snapshot) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Returns the download file name for an export taken on `date`,
/// `organize_data_MM-DD-YYYY.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("organize_data_{}.json", date.format("%m-%d-%Y"))
}
