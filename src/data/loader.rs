use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::{
    DataType, TimeUnit, TimestampMicrosecondType, TimestampMillisecondType,
    TimestampNanosecondType, TimestampSecondType,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DataError;
use super::model::{columns, Dataset, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load fuel-transaction records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the contract column names
/// * `.json`    – records-oriented array of objects
/// * `.parquet` – one row per transaction, Utf8/numeric/timestamp columns
///
/// All formats share the same cleaning rules: fuel and kmpl cells that do not
/// parse as finite numbers make the row invalid, invalid rows are dropped,
/// and vehicle identifiers are trimmed and uppercased.  A missing
/// `Created_date` column is not an error; the field is simply absent.
pub fn load_file(path: &Path) -> Result<Dataset, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Cell coercion ("coerce-or-missing")
// ---------------------------------------------------------------------------

/// Normalize a raw vehicle identifier: trim, uppercase.  Empty after
/// trimming means the cell is missing.
pub fn normalize_vehicle_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

/// Parse a numeric cell; anything that is not a finite number is missing.
pub fn coerce_f64(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a timestamp cell.  Accepts `2024-01-01 12:30:00`,
/// `2024-01-01T12:30:00` and bare dates (`2024-01-01`, midnight).
pub fn coerce_datetime(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Assemble a record from coerced cells; `None` when the row violates the
/// retention invariant and must be dropped.
fn clean_row(
    vehicle: &str,
    fuel: Option<f64>,
    kmpl: Option<f64>,
    created_at: Option<NaiveDateTime>,
) -> Option<Record> {
    Some(Record {
        vehicle_id: normalize_vehicle_id(vehicle)?,
        fuel_consumed: fuel?,
        kmpl: kmpl?,
        created_at,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset, DataError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let col_idx = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    };
    let vehicle_idx = col_idx(columns::VEHICLE_NO)?;
    let fuel_idx = col_idx(columns::EST_FUEL_CONSUMED)?;
    let kmpl_idx = col_idx(columns::LAST_TNX_KMPL)?;
    let created_idx = headers.iter().position(|h| h == columns::CREATED_DATE);

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let record = clean_row(
            row.get(vehicle_idx).unwrap_or(""),
            row.get(fuel_idx).and_then(coerce_f64),
            row.get(kmpl_idx).and_then(coerce_f64),
            created_idx
                .and_then(|i| row.get(i))
                .and_then(coerce_datetime),
        );
        records.extend(record);
    }

    Ok(Dataset::from_records(records))
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
///     "Vehicle_no": "ka01ab1234 ",
///     "Est_fuel_Consumed": 12.5,
///     "Last_Tnx_Kmpl": "3.2",
///     "Created_date": "2024-01-01"
///   },
///   ...
/// ]
/// ```
///
/// Numeric cells may be JSON numbers or strings; both go through the same
/// coercion.
fn load_json(path: &Path) -> Result<Dataset, DataError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let rows = root
        .as_array()
        .ok_or_else(|| DataError::InvalidData("expected top-level JSON array".to_string()))?;

    // Records-oriented dumps have uniform keys; the first row stands in for
    // the header.
    if let Some(first) = rows.first().and_then(|r| r.as_object()) {
        for name in [
            columns::VEHICLE_NO,
            columns::EST_FUEL_CONSUMED,
            columns::LAST_TNX_KMPL,
        ] {
            if !first.contains_key(name) {
                return Err(DataError::MissingColumn(name.to_string()));
            }
        }
    }

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| DataError::InvalidData(format!("row {i} is not a JSON object")))?;

        let vehicle = obj
            .get(columns::VEHICLE_NO)
            .and_then(JsonValue::as_str)
            .unwrap_or("");
        let record = clean_row(
            vehicle,
            obj.get(columns::EST_FUEL_CONSUMED).and_then(json_number),
            obj.get(columns::LAST_TNX_KMPL).and_then(json_number),
            obj.get(columns::CREATED_DATE)
                .and_then(JsonValue::as_str)
                .and_then(coerce_datetime),
        );
        records.extend(record);
    }

    Ok(Dataset::from_records(records))
}

/// Coerce a JSON value to a finite number; numbers and numeric strings both
/// count, anything else is missing.
fn json_number(val: &JsonValue) -> Option<f64> {
    match val {
        JsonValue::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        JsonValue::String(s) => coerce_f64(s),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing one row per transaction.
///
/// Expected schema:
/// - `Vehicle_no`: Utf8 or LargeUtf8
/// - `Est_fuel_Consumed`, `Last_Tnx_Kmpl`: Float64/Float32/Int64/Int32
///   (numeric strings also accepted)
/// - `Created_date` (optional): Utf8 or Timestamp of any unit
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset, DataError> {
    let file = std::fs::File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let col_idx = |name: &str| {
            schema
                .index_of(name)
                .map_err(|_| DataError::MissingColumn(name.to_string()))
        };
        let vehicle_col = batch.column(col_idx(columns::VEHICLE_NO)?);
        let fuel_col = batch.column(col_idx(columns::EST_FUEL_CONSUMED)?);
        let kmpl_col = batch.column(col_idx(columns::LAST_TNX_KMPL)?);
        let created_col = schema
            .index_of(columns::CREATED_DATE)
            .ok()
            .map(|i| batch.column(i));

        for row in 0..batch.num_rows() {
            let record = clean_row(
                string_cell(vehicle_col, row).as_deref().unwrap_or(""),
                f64_cell(fuel_col, row),
                f64_cell(kmpl_col, row),
                created_col.and_then(|col| datetime_cell(col, row)),
            );
            records.extend(record);
        }
    }

    Ok(Dataset::from_records(records))
}

// -- Parquet / Arrow cell helpers --

fn string_cell(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => Some(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        _ => None,
    }
}

fn f64_cell(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let value = match col.data_type() {
        DataType::Float64 => col.as_any().downcast_ref::<Float64Array>()?.value(row),
        DataType::Float32 => col.as_any().downcast_ref::<Float32Array>()?.value(row) as f64,
        DataType::Int64 => col.as_any().downcast_ref::<Int64Array>()?.value(row) as f64,
        DataType::Int32 => col.as_any().downcast_ref::<Int32Array>()?.value(row) as f64,
        DataType::Utf8 | DataType::LargeUtf8 => {
            return string_cell(col, row).as_deref().and_then(coerce_f64);
        }
        _ => return None,
    };
    value.is_finite().then_some(value)
}

fn datetime_cell(col: &Arc<dyn Array>, row: usize) -> Option<NaiveDateTime> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            string_cell(col, row).as_deref().and_then(coerce_datetime)
        }
        DataType::Timestamp(unit, _) => {
            let micros = match unit {
                TimeUnit::Second => col
                    .as_primitive::<TimestampSecondType>()
                    .value(row)
                    .checked_mul(1_000_000)?,
                TimeUnit::Millisecond => col
                    .as_primitive::<TimestampMillisecondType>()
                    .value(row)
                    .checked_mul(1_000)?,
                TimeUnit::Microsecond => col.as_primitive::<TimestampMicrosecondType>().value(row),
                TimeUnit::Nanosecond => {
                    col.as_primitive::<TimestampNanosecondType>().value(row) / 1_000
                }
            };
            chrono::DateTime::from_timestamp_micros(micros).map(|dt| dt.naive_utc())
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(ext: &str, contents: &str) -> tempfile::TempPath {
        let mut file = tempfile::Builder::new()
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.into_temp_path()
    }

    #[test]
    fn coerce_f64_accepts_numbers_and_rejects_junk() {
        assert_eq!(coerce_f64(" 12.5 "), Some(12.5));
        assert_eq!(coerce_f64("-3"), Some(-3.0));
        assert_eq!(coerce_f64("bad"), None);
        assert_eq!(coerce_f64(""), None);
        assert_eq!(coerce_f64("NaN"), None);
        assert_eq!(coerce_f64("inf"), None);
    }

    #[test]
    fn coerce_datetime_formats() {
        let full = coerce_datetime("2024-01-02 03:04:05").unwrap();
        assert_eq!(full.to_string(), "2024-01-02 03:04:05");
        let iso = coerce_datetime("2024-01-02T03:04:05").unwrap();
        assert_eq!(iso, full);
        let bare = coerce_datetime(" 2024-01-02 ").unwrap();
        assert_eq!(bare.to_string(), "2024-01-02 00:00:00");
        assert_eq!(coerce_datetime("not a date"), None);
    }

    #[test]
    fn normalize_trims_and_uppercases() {
        assert_eq!(normalize_vehicle_id("  ka01ab1234 "), Some("KA01AB1234".to_string()));
        assert_eq!(normalize_vehicle_id("   "), None);
    }

    #[test]
    fn csv_end_to_end_drops_bad_rows() {
        let path = write_temp(
            "csv",
            "Vehicle_no,Est_fuel_Consumed,Last_Tnx_Kmpl,Created_date\n\
             A1,12.5,3.2,2024-01-01\n\
             a1 ,bad,4.0,2024-01-02\n\
             B2,9.0,2.1,\n",
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].vehicle_id, "A1");
        assert_eq!(ds.records[0].fuel_consumed, 12.5);
        assert_eq!(ds.records[0].kmpl, 3.2);
        assert_eq!(
            ds.records[0].created_at.unwrap().to_string(),
            "2024-01-01 00:00:00"
        );
        assert_eq!(ds.records[1].vehicle_id, "B2");
        assert_eq!(ds.records[1].created_at, None);
        assert_eq!(ds.vehicle_ids, vec!["A1", "B2"]);
    }

    #[test]
    fn csv_ids_are_normalized() {
        let path = write_temp(
            "csv",
            "Vehicle_no,Est_fuel_Consumed,Last_Tnx_Kmpl\n\
             \" ka01 \",1.0,2.0\n\
             KA01,3.0,4.0\n",
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert!(ds.records.iter().all(|r| r.vehicle_id == "KA01"));
        assert_eq!(ds.vehicle_ids, vec!["KA01"]);
    }

    #[test]
    fn csv_missing_required_column_fails() {
        let path = write_temp("csv", "Vehicle_no,Last_Tnx_Kmpl\nA1,3.2\n");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "Est_fuel_Consumed"));
    }

    #[test]
    fn csv_without_created_date_is_fine() {
        let path = write_temp(
            "csv",
            "Vehicle_no,Est_fuel_Consumed,Last_Tnx_Kmpl\nA1,1.0,2.0\n",
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].created_at, None);
    }

    #[test]
    fn json_mixed_cell_types() {
        let path = write_temp(
            "json",
            r#"[
              {"Vehicle_no": " a1", "Est_fuel_Consumed": 12.5, "Last_Tnx_Kmpl": "3.2", "Created_date": "2024-01-01"},
              {"Vehicle_no": "B2", "Est_fuel_Consumed": "oops", "Last_Tnx_Kmpl": 4.0, "Created_date": null},
              {"Vehicle_no": "C3", "Est_fuel_Consumed": 9, "Last_Tnx_Kmpl": 2.1, "Created_date": "garbage"}
            ]"#,
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].vehicle_id, "A1");
        assert_eq!(ds.records[0].kmpl, 3.2);
        assert_eq!(ds.records[1].vehicle_id, "C3");
        assert_eq!(ds.records[1].created_at, None);
    }

    #[test]
    fn json_missing_column_fails() {
        let path = write_temp("json", r#"[{"Vehicle_no": "A1", "Last_Tnx_Kmpl": 3.0}]"#);
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(_)));
    }

    #[test]
    fn unsupported_extension() {
        let err = load_file(Path::new("fleet.xlsx")).unwrap_err();
        assert!(matches!(err, DataError::UnsupportedFormat(ref e) if e == "xlsx"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_file(Path::new("/nonexistent/fleet.csv")).is_err());
    }
}
