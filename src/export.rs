//! CSV and JSON export of record sequences.
//!
//! Consumes the filtered records the dashboard shows; nothing here feeds back
//! into the analytics.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SalesError};
use crate::models::SalesRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }
}

/// Serialize `records` as CSV with a header row.
///
/// Fields containing the delimiter are quoted. Returns an empty string for
/// an empty slice.
pub fn to_csv(records: &[SalesRecord]) -> Result<String> {
    if records.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| SalesError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| SalesError::InvalidArgument(e.to_string()))
}

/// Serialize `records` as pretty-printed JSON (two-space indent).
pub fn to_json(records: &[SalesRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Serialize `records` in `format`.
pub fn export(format: ExportFormat, records: &[SalesRecord]) -> Result<String> {
    match format {
        ExportFormat::Csv => to_csv(records),
        ExportFormat::Json => to_json(records),
    }
}

/// Write `records` to `<dir>/<stem>.<ext>` and return the path written.
pub fn write_export(
    dir: &Path,
    stem: &str,
    format: ExportFormat,
    records: &[SalesRecord],
) -> Result<PathBuf> {
    if stem.trim().is_empty() {
        return Err(SalesError::InvalidArgument(
            "export file name must not be empty".into(),
        ));
    }
    let contents = export(format, records)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.{}", stem, format.extension()));
    fs::write(&path, contents)?;
    debug!(path = %path.display(), count = records.len(), "wrote export");
    Ok(path)
}

/// Flat CSV row; optional columns are left empty when absent.
///
/// Amounts use `f64`'s `Display`, so whole values are written as `10000`
/// rather than `10000.0`.
#[derive(Serialize)]
struct CsvRow<'a> {
    id: Option<u64>,
    year: i32,
    month: &'a str,
    sales: String,
    revenue: String,
    region: &'a str,
    product: &'a str,
    profit: Option<String>,
    customers: Option<String>,
}

impl<'a> From<&'a SalesRecord> for CsvRow<'a> {
    fn from(r: &'a SalesRecord) -> Self {
        Self {
            id: r.id,
            year: r.year,
            month: r.month.label(),
            sales: r.sales.to_string(),
            revenue: r.revenue.to_string(),
            region: &r.region,
            product: &r.product,
            profit: r.profit.map(|v| v.to_string()),
            customers: r.customers.map(|v| v.to_string()),
        }
    }
}
