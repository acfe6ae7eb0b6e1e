use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Catalog, COL_TITLE, COL_TYPE};
use super::normalize::normalize;

// ---------------------------------------------------------------------------
// Errors and the untyped source table
// ---------------------------------------------------------------------------

/// Structural problems that make a source unusable as a catalog.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("source is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("expected a top-level JSON array of records")]
    NotAnArray,
    #[error("row {0} is not a JSON object")]
    NotAnObject(usize),
}

/// Source rows before normalization. `None` marks a missing cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn ensure_required(&self) -> Result<(), SchemaError> {
        for required in [COL_TITLE, COL_TYPE] {
            if self.column_index(required).is_none() {
                return Err(SchemaError::MissingColumn(required));
            }
        }
        Ok(())
    }
}

/// Empty and whitespace-only cells are missing.
fn cell(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and normalize a catalog from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row + one title per line (the usual export)
/// * `.json`    – `[{ "title": "...", "type": "Movie", ... }, ...]`
/// * `.parquet` – flat columns of strings / numbers / bools
pub fn load_file(path: &Path) -> Result<Catalog> {
    let raw = read_file(path).with_context(|| format!("loading {}", path.display()))?;
    let catalog = normalize(raw);
    log::info!(
        "Loaded {} titles from {} ({} columns)",
        catalog.len(),
        path.display(),
        catalog.columns().len()
    );
    Ok(catalog)
}

/// Read a file into a [`RawTable`] without normalizing it.
pub fn read_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv(file)?
        }
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => return Err(SchemaError::UnsupportedExtension(other.to_string()).into()),
    };
    raw.ensure_required()?;
    Ok(raw)
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Read CSV text with a header row. Short rows are padded with missing cells.
pub fn read_csv<R: Read>(reader: R) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row: Vec<Option<String>> = (0..columns.len())
            .map(|i| record.get(i).and_then(cell))
            .collect();
        rows.push(row);
    }

    let raw = RawTable { columns, rows };
    raw.ensure_required()?;
    Ok(raw)
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "title": "Dick Johnson Is Dead", "type": "Movie", "duration": "90 min" },
///   ...
/// ]
/// ```
///
/// A column is placed at the first record that mentions it.
fn read_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
    let records = root.as_array().ok_or(SchemaError::NotAnArray)?;

    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or(SchemaError::NotAnObject(i))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).and_then(json_to_cell))
                .collect()
        })
        .collect();

    Ok(RawTable { columns, rows })
}

fn json_to_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::String(s) => cell(s),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Null => None,
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per catalog field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn read_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let values = (0..batch.num_columns())
                .map(|col_idx| extract_cell(batch.column(col_idx), row))
                .collect();
            rows.push(values);
        }
    }

    Ok(RawTable { columns, rows })
}

/// Extract a single cell from an Arrow column as text.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .and_then(|s| cell(s.value(row))),
        DataType::LargeUtf8 => cell(col.as_string::<i64>().value(row)),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row).to_string()),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row).to_string()),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row).to_string()),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row).to_string()),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| a.value(row).to_string()),
        other => {
            log::debug!("unsupported parquet column type {other:?}, treating as missing");
            None
        }
    }
}
