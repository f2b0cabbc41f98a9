// 📥 Import Pipeline - CSV/XLSX/JSON ingestion
// Reads raw export files, resolves their headers, and normalizes every row
// into a PaymentEntity. Unparsable rows degrade to warnings, never abort
// the import; only missing required columns fail the whole file.

use crate::columns::{self};
use crate::payment::{PaymentEntity, RawRecord};
use crate::rates::RateLookup;
use anyhow::{bail, Context, Result};
use calamine::{Data, Reader};
use chrono::{Duration, NaiveDate};
use log::{info, warn};
use serde_json::Value;
use std::fs;
use std::path::Path;

// ============================================================================
// FORMAT DETECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Xlsx,
    Json,
}

/// Detect the input format from the file extension
pub fn detect_format(path: &Path) -> Result<ImportFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "csv" | "txt" => Ok(ImportFormat::Csv),
        "xlsx" | "xls" => Ok(ImportFormat::Xlsx),
        "json" => Ok(ImportFormat::Json),
        other => bail!("Unsupported file format: .{}", other),
    }
}

// ============================================================================
// FILE IMPORT
// ============================================================================

/// Import a payment export file, dispatching on its extension
pub fn import_file(path: &Path, rates: &mut dyn RateLookup) -> Result<Vec<PaymentEntity>> {
    match detect_format(path)? {
        ImportFormat::Csv => import_csv(path, rates),
        ImportFormat::Xlsx => import_xlsx(path, rates),
        ImportFormat::Json => import_json(path, rates),
    }
}

/// Import a CSV export.
///
/// Rows are read as byte records and decoded lossily, since the legacy
/// export tooling ships mixed encodings; the mojibake forms that survive
/// decoding are handled downstream by the alias and keyword tables.
pub fn import_csv(path: &Path, rates: &mut dyn RateLookup) -> Result<Vec<PaymentEntity>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let headers: Vec<String> = reader
        .byte_headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_string())
        .collect();

    let mut records = Vec::new();
    for (row_idx, result) in reader.byte_records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping malformed CSV row {}: {}", row_idx + 2, e);
                continue;
            }
        };
        let mut raw = RawRecord::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            let text = String::from_utf8_lossy(value).trim().to_string();
            raw.insert(header.clone(), Value::String(text));
        }
        records.push(raw);
    }

    import_records(&headers, records, rates)
}

/// Import an Excel export: first sheet, first row as headers
pub fn import_xlsx(path: &Path, rates: &mut dyn RateLookup) -> Result<Vec<PaymentEntity>> {
    let mut workbook = calamine::open_workbook_auto(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .context("Excel file has no sheets")?;
    let range = workbook
        .worksheet_range(&sheet)
        .with_context(|| format!("Failed to read sheet '{}'", sheet))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(cell_text).collect(),
        None => bail!("Excel sheet '{}' is empty", sheet),
    };

    let mut records = Vec::new();
    for row in rows {
        let mut raw = RawRecord::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            raw.insert(header.clone(), cell_to_value(cell));
        }
        records.push(raw);
    }

    import_records(&headers, records, rates)
}

/// Excel cell → the scalar the normalizer expects. Date cells come out as
/// `YYYY-MM-DD HH:MM:SS` strings matching the normalizer's format list.
fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::String(String::new()),
        Data::String(s) => Value::String(s.trim().to_string()),
        Data::Float(f) => Value::from(*f),
        Data::Int(i) => Value::from(*i),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => Value::String(excel_serial_to_datetime(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
    }
}

fn cell_text(cell: &Data) -> String {
    match cell_to_value(cell) {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Excel stores dates as day serials from the 1899-12-30 epoch (the 1900
/// leap-year bug accounted for)
fn excel_serial_to_datetime(serial: f64) -> String {
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let seconds = (serial * 86_400.0).round() as i64;
    (base + Duration::seconds(seconds))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Import a JSON export: a top-level array of flat objects
pub fn import_json(path: &Path, rates: &mut dyn RateLookup) -> Result<Vec<PaymentEntity>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
    let parsed: Vec<RawRecord> =
        serde_json::from_str(&contents).context("Expected a JSON array of objects")?;

    // Header universe is the union of keys across all rows; sparse exports
    // omit empty cells per row
    let mut headers: Vec<String> = Vec::new();
    for record in &parsed {
        for key in record.keys() {
            let trimmed = key.trim().to_string();
            if !headers.contains(&trimmed) {
                headers.push(trimmed);
            }
        }
    }

    import_records(&headers, parsed, rates)
}

// ============================================================================
// RECORD NORMALIZATION
// ============================================================================

/// Resolve the headers and normalize every record. Fails only when required
/// columns are missing; individual rows never abort the batch.
pub fn import_records(
    headers: &[String],
    records: Vec<RawRecord>,
    rates: &mut dyn RateLookup,
) -> Result<Vec<PaymentEntity>> {
    let column_map = columns::resolve_columns(headers);
    let missing = columns::missing_required(&column_map);
    if !missing.is_empty() {
        bail!("Missing required columns: {}", missing.join(", "));
    }

    info!(
        "Resolved {} of {} headers; normalizing {} rows",
        column_map.len(),
        headers.len(),
        records.len()
    );

    let entities = records
        .into_iter()
        .map(|record| PaymentEntity::from_record(&record, &column_map, rates))
        .collect();

    Ok(entities)
}

/// Screen normalized entities: empty rows are dropped, degraded ones are
/// kept and reported as warnings.
pub fn validate_entities(entities: Vec<PaymentEntity>) -> (Vec<PaymentEntity>, Vec<String>) {
    let mut valid = Vec::new();
    let mut warnings = Vec::new();

    for (idx, entity) in entities.into_iter().enumerate() {
        let row = idx + 1;
        if entity.customer_name.is_empty() && entity.amount == 0.0 {
            warnings.push(format!("Row {}: empty row dropped", row));
            continue;
        }
        if entity.customer_name.is_empty() {
            warnings.push(format!("Row {}: missing customer name", row));
        }
        if entity.date.is_none() {
            warnings.push(format!(
                "Row {}: unparsable date for '{}', kept without conversion",
                row, entity.customer_name
            ));
        }
        if entity.amount == 0.0 {
            warnings.push(format!(
                "Row {}: zero amount for '{}'",
                row, entity.customer_name
            ));
        }
        valid.push(entity);
    }

    (valid, warnings)
}

// ============================================================================
// TESTS
// ============================================================================
