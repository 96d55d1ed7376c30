//! CSV loading for the bundled Korail reference files.
//!
//! The files are published in EUC-KR. They are decoded to UTF-8 in full
//! before CSV parsing, and every row becomes a header → value map that the
//! record types pick their key columns from.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;

use tracing::warn;

use crate::domain::{ScheduleRecord, StationRecord};

use super::error::DatasetError;
use super::table::{ScheduleTable, StationTable};

/// File name of the freight train timetable.
pub const SCHEDULE_FILE: &str = "한국철도공사_화물열차운행_시간표_20200110.csv";

/// File name of the freight station directory.
pub const STATION_FILE: &str = "한국철도공사_화물역_현황_20191226.csv";

/// Load the freight train timetable from `path`.
pub fn load_schedules(path: &Path) -> Result<ScheduleTable, DatasetError> {
    let records = read_rows(path)?
        .into_iter()
        .map(ScheduleRecord::from_columns)
        .collect();
    Ok(ScheduleTable::new(records))
}

/// Load the freight station directory from `path`.
pub fn load_stations(path: &Path) -> Result<StationTable, DatasetError> {
    let records = read_rows(path)?
        .into_iter()
        .map(StationRecord::from_columns)
        .collect();
    Ok(StationTable::new(records))
}

/// Decode EUC-KR bytes, replacing malformed sequences.
pub fn decode_euc_kr(bytes: &[u8]) -> Cow<'_, str> {
    let (text, _, had_errors) = encoding_rs::EUC_KR.decode(bytes);
    if had_errors {
        warn!("input contained bytes that are not valid EUC-KR; replaced");
    }
    text
}

/// Read a CSV file into one header → value map per data row.
fn read_rows(path: &Path) -> Result<Vec<BTreeMap<String, String>>, DatasetError> {
    let bytes = std::fs::read(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode_euc_kr(&bytes);

    let csv_error = |source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        // Short rows simply lack the trailing columns.
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}
