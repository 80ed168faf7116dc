use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, AsArray, Date32Array, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use chrono::{NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

pub const COL_MONTH: &str = "Month";
pub const COL_REGION: &str = "Region";
pub const COL_CATEGORY: &str = "Product_Category";
pub const COL_REVENUE: &str = "Revenue";
pub const COL_UNITS: &str = "Units_Sold";
pub const COL_TURNOVER: &str = "Inventory_Turnover";

/// Columns every input file must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_MONTH,
    COL_REGION,
    COL_CATEGORY,
    COL_REVENUE,
    COL_UNITS,
    COL_TURNOVER,
];

/// Structured load failures, surfaced through the `anyhow` chain so callers
/// can still downcast when they care which rule was broken.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: '{value}' is not a recognised month")]
    InvalidMonth { row: usize, value: String },
    #[error("file contains no records")]
    NoRecords,
}

/// One source row before type coercion. CSV and JSON both funnel through
/// this via serde; parquet columns are extracted directly.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Product_Category")]
    product_category: String,
    #[serde(rename = "Revenue")]
    revenue: f64,
    #[serde(rename = "Units_Sold")]
    units_sold: f64,
    #[serde(rename = "Inventory_Turnover")]
    inventory_turnover: f64,
}

impl RawRecord {
    fn into_record(self, row: usize) -> Result<Record, LoadError> {
        let month = match parse_month(&self.month) {
            Some(m) => m,
            None => {
                return Err(LoadError::InvalidMonth {
                    row,
                    value: self.month,
                });
            }
        };
        Ok(Record {
            month,
            region: self.region,
            product_category: self.product_category,
            revenue: self.revenue,
            units_sold: self.units_sold,
            inventory_turnover: self.inventory_turnover,
        })
    }
}

/// Parse an ISO-ish month value.
///
/// Accepted forms, tried in order: `2024-03-01`, `2024/03/01`, datetime
/// round-trips from dataframe exports (`2024-03-01 00:00:00`,
/// `2024-03-01T00:00:00`), and bare `2024-03` completed to the first of
/// the month.
fn parse_month(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    let (year, month) = s.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a business-performance table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the six required columns
/// * `.json`    – records-oriented array (`df.to_json(orient='records')`)
/// * `.parquet` – flat columns; `Month` as a `Date32` or string column
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!(LoadError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let file = File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse CSV from any reader (split from the file open so tests can feed
/// byte slices).
fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers().context("reading CSV headers")?;
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            bail!(LoadError::MissingColumn(col));
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.into_record(row_no)?);
    }

    Dataset::from_records(records).ok_or_else(|| LoadError::NoRecords.into())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Month": "2024-01-01",
///     "Region": "East",
///     "Product_Category": "Footwear",
///     "Revenue": 125000.0,
///     "Units_Sold": 1400,
///     "Inventory_Turnover": 4.2
///   }
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Dataset> {
    let raws: Vec<RawRecord> = serde_json::from_str(text).context("parsing JSON records")?;

    let mut records = Vec::with_capacity(raws.len());
    for (row_no, raw) in raws.into_iter().enumerate() {
        records.push(raw.into_record(row_no)?);
    }

    Dataset::from_records(records).ok_or_else(|| LoadError::NoRecords.into())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a parquet file with one flat column per schema field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): `Month` may arrive as a `Date32`
/// column or as strings, the metrics as any common numeric type.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let month_col = batch_column(&batch, COL_MONTH)?;
        let region_col = batch_column(&batch, COL_REGION)?;
        let category_col = batch_column(&batch, COL_CATEGORY)?;
        let revenue_col = batch_column(&batch, COL_REVENUE)?;
        let units_col = batch_column(&batch, COL_UNITS)?;
        let turnover_col = batch_column(&batch, COL_TURNOVER)?;

        for row in 0..batch.num_rows() {
            let row_no = records.len();
            records.push(Record {
                month: month_at(month_col, row)
                    .with_context(|| format!("row {row_no}: reading '{COL_MONTH}'"))?,
                region: string_at(region_col, row)
                    .with_context(|| format!("row {row_no}: reading '{COL_REGION}'"))?,
                product_category: string_at(category_col, row)
                    .with_context(|| format!("row {row_no}: reading '{COL_CATEGORY}'"))?,
                revenue: number_at(revenue_col, row)
                    .with_context(|| format!("row {row_no}: reading '{COL_REVENUE}'"))?,
                units_sold: number_at(units_col, row)
                    .with_context(|| format!("row {row_no}: reading '{COL_UNITS}'"))?,
                inventory_turnover: number_at(turnover_col, row)
                    .with_context(|| format!("row {row_no}: reading '{COL_TURNOVER}'"))?,
            });
        }
    }

    Dataset::from_records(records).ok_or_else(|| LoadError::NoRecords.into())
}

// -- Parquet / Arrow helpers --

fn batch_column<'a>(batch: &'a RecordBatch, name: &'static str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .ok_or_else(|| LoadError::MissingColumn(name).into())
}

/// Read one month cell: `Date32` natively, otherwise a string parsed with
/// the same tolerance as the CSV path.
fn month_at(col: &ArrayRef, row: usize) -> Result<NaiveDate> {
    if col.is_null(row) {
        bail!("null month value");
    }
    match col.data_type() {
        DataType::Date32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Date32Array>()
                .context("expected Date32Array")?;
            arr.value_as_date(row).context("Date32 value out of range")
        }
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            let value = arr.value(row);
            parse_month(value).ok_or_else(|| {
                LoadError::InvalidMonth {
                    row,
                    value: value.to_string(),
                }
                .into()
            })
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            let value = arr.value(row);
            parse_month(value).ok_or_else(|| {
                LoadError::InvalidMonth {
                    row,
                    value: value.to_string(),
                }
                .into()
            })
        }
        other => bail!("Month column has unsupported type {other:?}"),
    }
}

fn string_at(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null string value");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            Ok(arr.value(row).to_string())
        }
        other => bail!("expected a string column, got {other:?}"),
    }
}

fn number_at(col: &ArrayRef, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null numeric value");
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row) as f64)
        }
        other => bail!("expected a numeric column, got {other:?}"),
    }
}
