//! Dataset ingestion
//!
//! Reads the delimited app store export into raw string records. The
//! header row is checked up front so a missing required column fails the
//! run immediately with the column name; individual rows that cannot be
//! deserialized at all (the wild dataset contains a few shifted rows)
//! are logged and skipped.

use serde::Deserialize;
use std::path::Path;
use storegraph_common::{Result, StoregraphError};
use tracing::{info, instrument, warn};

/// Dataset columns that must be present
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "App",
    "Category",
    "Rating",
    "Reviews",
    "Size",
    "Installs",
    "Type",
    "Price",
    "Content Rating",
    "Last Updated",
    "Android Ver",
];

/// One raw dataset row, every cell still a string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "App")]
    pub app: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Rating", default)]
    pub rating: String,
    #[serde(rename = "Reviews", default)]
    pub reviews: String,
    #[serde(rename = "Size", default)]
    pub size: String,
    #[serde(rename = "Installs", default)]
    pub installs: String,
    #[serde(rename = "Type", default)]
    pub app_type: String,
    #[serde(rename = "Price", default)]
    pub price: String,
    #[serde(rename = "Content Rating", default)]
    pub content_rating: String,
    #[serde(rename = "Last Updated", default)]
    pub last_updated: String,
    #[serde(rename = "Android Ver", default)]
    pub android_ver: String,
    /// Optional column; a missing header leaves this None
    #[serde(rename = "Sentiment_Subjectivity", default)]
    pub sentiment_subjectivity: Option<String>,
}

/// Load all rows from a dataset file
#[instrument]
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        StoregraphError::dataset_with_source("cannot open dataset", path, e)
    })?;

    let headers = reader
        .headers()
        .map_err(|e| StoregraphError::dataset_with_source("cannot read dataset header", path, e))?
        .clone();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(StoregraphError::missing_column(required));
        }
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (idx, row) in reader.deserialize::<RawRecord>().enumerate() {
        match row {
            Ok(record) => records.push(record),
            Err(e) => {
                // +2: one for the header row, one for 1-based numbering
                warn!(row = idx + 2, error = %e, "Skipping malformed dataset row");
                skipped += 1;
            }
        }
    }

    info!(rows = records.len(), skipped, path = %path.display(), "Loaded dataset");
    Ok(records)
}
