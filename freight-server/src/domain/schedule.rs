//! Freight train schedule records.

use std::collections::BTreeMap;

use serde::Serialize;

/// CSV header of the train number column.
pub const TRAIN_NO_COLUMN: &str = "열차번호";
/// CSV header of the origin station column.
pub const ORIGIN_COLUMN: &str = "시발역";
/// CSV header of the destination station column.
pub const DESTINATION_COLUMN: &str = "종착역";
/// CSV header of the primary operating line column.
pub const LINE_COLUMN: &str = "주운행선";

/// One scheduled freight train, as read from the timetable file.
///
/// The named fields are the ones the service queries on. Every other
/// column of the row is kept in `extra` and passed through untouched.
///
/// Serialization does not reproduce the row byte for byte: the four key
/// columns are always present (empty if the file lacked them), and the
/// remaining columns follow in header-name order rather than file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRecord {
    #[serde(rename = "열차번호")]
    pub train_no: String,

    #[serde(rename = "시발역")]
    pub origin: String,

    #[serde(rename = "종착역")]
    pub destination: String,

    #[serde(rename = "주운행선")]
    pub line: String,

    /// Remaining columns, keyed by header.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ScheduleRecord {
    /// Build a record from a header → value map.
    ///
    /// Missing key columns become empty strings rather than errors: the
    /// source files are not validated and a short row must still load.
    pub fn from_columns(mut columns: BTreeMap<String, String>) -> Self {
        let mut take = |key: &str| columns.remove(key).unwrap_or_default();

        let train_no = take(TRAIN_NO_COLUMN);
        let origin = take(ORIGIN_COLUMN);
        let destination = take(DESTINATION_COLUMN);
        let line = take(LINE_COLUMN);

        Self {
            train_no,
            origin,
            destination,
            line,
            extra: columns,
        }
    }

    /// Project this record into the autocomplete summary form.
    pub fn summary(&self) -> TrainSummary {
        TrainSummary {
            train_no: self.train_no.clone(),
            route: format!("{} → {}", self.origin, self.destination),
            line: self.line.clone(),
        }
    }
}

/// Compact view of a schedule used for train number autocomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainSummary {
    pub train_no: String,

    /// `"<origin> → <destination>"`
    pub route: String,

    pub line: String,
}
