//! Output sinks for finished scenario tables
//!
//! The external renderer boundary: sinks only see the ordered rows of a
//! [`RenderTable`]. Supports pretty-printed JSON and CSV append with
//! headers written on file creation.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use storegraph_common::{Result, StoregraphError};
use storegraph_pipeline::{RenderTable, TableRenderer};
use tracing::debug;

/// Writes tables as pretty-printed JSON, to stdout or a file
pub struct JsonSink {
    target: Option<PathBuf>,
}

impl JsonSink {
    pub fn new(target: Option<PathBuf>) -> Self {
        Self { target }
    }
}

impl TableRenderer for JsonSink {
    fn render(&self, table: &RenderTable) -> Result<()> {
        let document = serde_json::json!({
            "scenario": table.title,
            "columns": table.columns,
            "rows": table.rows,
        });
        let text = serde_json::to_string_pretty(&document)?;

        match &self.target {
            Some(path) => {
                use std::io::Write;
                let mut file = OpenOptions::new().append(true).create(true).open(path)?;
                writeln!(file, "{text}")?;
                debug!(path = %path.display(), "Appended JSON table");
            }
            None => println!("{text}"),
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "json"
    }

    fn description(&self) -> &'static str {
        "Pretty-printed JSON table documents"
    }
}

/// Appends table rows to a CSV file, or writes CSV to stdout.
///
/// The header row is written only when the target file is created.
pub struct CsvSink {
    target: Option<PathBuf>,
}

impl CsvSink {
    pub fn new(target: Option<PathBuf>) -> Self {
        Self { target }
    }

    fn write_table<W: std::io::Write>(
        table: &RenderTable,
        writer: &mut csv::Writer<W>,
        with_headers: bool,
    ) -> Result<()> {
        let csv_err = |e: csv::Error| StoregraphError::with_source("failed to write CSV output", e);

        if with_headers {
            writer.write_record(table.column_names()).map_err(csv_err)?;
        }
        for row in &table.rows {
            writer
                .write_record(row.iter().map(|cell| cell.display()))
                .map_err(csv_err)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl TableRenderer for CsvSink {
    fn render(&self, table: &RenderTable) -> Result<()> {
        match &self.target {
            Some(path) => {
                let file_exists = Path::new(path).exists();
                debug!(path = %path.display(), file_exists, "Appending CSV table");

                let file = OpenOptions::new().append(true).create(true).open(path)?;
                let mut writer = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(file);
                Self::write_table(table, &mut writer, !file_exists)
            }
            None => {
                let mut writer = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(std::io::stdout());
                Self::write_table(table, &mut writer, true)
            }
        }
    }

    fn name(&self) -> &'static str {
        "csv"
    }

    fn description(&self) -> &'static str {
        "Delimited table rows, appended with headers on file creation"
    }
}
