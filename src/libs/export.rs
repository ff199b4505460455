//! Report export to CSV and JSON.
//!
//! Any report row type is exported as-is: CSV gets one header row built from
//! the field names and one record per row, with `None` columns left empty.
//! JSON is a pretty-printed array where `None` becomes `null`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use curricula::db::{db::Db, reports::Reports};
//! use curricula::libs::export::{ExportFormat, Exporter};
//!
//! let db = Db::open("curricula.db")?;
//! let rows = Reports::new(&db).course_objectives_of_program("Computer Science")?;
//! Exporter::new(ExportFormat::Csv, "course-objectives", None).export(&rows)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::Result;
use chrono::Local;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// Pretty-printed JSON array.
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Without an explicit path the file is named `curricula_<report>_<timestamp>.<ext>`.
    pub fn new(format: ExportFormat, report_name: &str, output_path: Option<PathBuf>) -> Self {
        let output_path = output_path.unwrap_or_else(|| {
            PathBuf::from(format!(
                "curricula_{}_{}.{}",
                report_name,
                Local::now().format("%Y%m%d_%H%M%S"),
                format.extension()
            ))
        });

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export<T: Serialize>(&self, rows: &[T]) -> Result<()> {
        match self.format {
            ExportFormat::Csv => self.export_csv(rows),
            ExportFormat::Json => self.export_json(rows),
        }
    }

    fn export_csv<T: Serialize>(&self, rows: &[T]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn export_json<T: Serialize>(&self, rows: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(rows)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }
}
