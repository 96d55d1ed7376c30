//! Live train status, derived from scraped station rows.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Status label substrings meaning the train is past a station:
/// "통과" (passed through) and "출발" (departed).
///
/// These follow the upstream page's wording and are matched verbatim;
/// any change in that markup changes the inferred status.
pub const PASSED_MARKERS: [&str; 2] = ["통과", "출발"];

/// One station row from a live status page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStatusRow {
    pub name: String,
    pub arrival: String,
    pub departure: String,
    /// Free-text status label, as shown by the source.
    pub status: String,
}

impl StationStatusRow {
    /// Whether this row's status label marks the station as passed.
    pub fn is_passed(&self) -> bool {
        PASSED_MARKERS
            .iter()
            .any(|marker| self.status.contains(marker))
    }
}

/// Coarse status of a train, as exposed in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainStatus {
    Unknown,
    Scheduled,
    Running,
    Completed,
}

/// Where a train is along its route.
///
/// Only `Running` carries a current station, so a current station can
/// never be reported for any other status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// No station rows at all.
    Unknown,
    /// Rows exist but none is passed.
    Scheduled,
    /// Some rows are passed; the last passed station in route order.
    Running { current_station: String },
    /// Every row is passed.
    Completed,
}

impl Progress {
    /// Infer progress from station rows in route order.
    ///
    /// When passed rows are not contiguous the current station is still
    /// the last passed row in document order.
    pub fn infer(stations: &[StationStatusRow]) -> Self {
        if stations.is_empty() {
            return Progress::Unknown;
        }

        let mut passed = 0;
        let mut last_passed = None;
        for row in stations.iter().filter(|row| row.is_passed()) {
            passed += 1;
            last_passed = Some(row);
        }

        match last_passed {
            _ if passed == stations.len() => Progress::Completed,
            Some(row) => Progress::Running {
                current_station: row.name.clone(),
            },
            None => Progress::Scheduled,
        }
    }

    pub fn status(&self) -> TrainStatus {
        match self {
            Progress::Unknown => TrainStatus::Unknown,
            Progress::Scheduled => TrainStatus::Scheduled,
            Progress::Running { .. } => TrainStatus::Running,
            Progress::Completed => TrainStatus::Completed,
        }
    }

    pub fn current_station(&self) -> Option<&str> {
        match self {
            Progress::Running { current_station } => Some(current_station),
            _ => None,
        }
    }
}

/// Live status of one train on one operating date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainInfoResult {
    pub train_no: String,
    pub train_date: String,
    /// Rows in route order.
    pub stations: Vec<StationStatusRow>,
    pub progress: Progress,
    pub last_update: DateTime<Utc>,
}

impl TrainInfoResult {
    /// Build a result, inferring progress from `stations`.
    pub fn new(
        train_no: impl Into<String>,
        train_date: impl Into<String>,
        stations: Vec<StationStatusRow>,
        last_update: DateTime<Utc>,
    ) -> Self {
        let progress = Progress::infer(&stations);
        Self {
            train_no: train_no.into(),
            train_date: train_date.into(),
            stations,
            progress,
            last_update,
        }
    }

    pub fn status(&self) -> TrainStatus {
        self.progress.status()
    }

    pub fn current_station(&self) -> Option<&str> {
        self.progress.current_station()
    }
}

/// JSON shape of a [`TrainInfoResult`].
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TrainInfoWire<'a> {
    train_no: &'a str,
    train_date: &'a str,
    stations: &'a [StationStatusRow],
    status: TrainStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_station: Option<&'a str>,
    last_update: DateTime<Utc>,
}

impl Serialize for TrainInfoResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TrainInfoWire {
            train_no: &self.train_no,
            train_date: &self.train_date,
            stations: &self.stations,
            status: self.status(),
            current_station: self.current_station(),
            last_update: self.last_update,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, status: &str) -> StationStatusRow {
        StationStatusRow {
            name: name.to_string(),
            arrival: String::new(),
            departure: String::new(),
            status: status.to_string(),
        }
    }

    #[test]
    fn empty_rows_are_unknown() {
        assert_eq!(Progress::infer(&[]), Progress::Unknown);
    }

    #[test]
    fn all_passed_is_completed() {
        let rows = [row("A", "통과"), row("B", "출발"), row("C", "통과")];
        let progress = Progress::infer(&rows);

        assert_eq!(progress, Progress::Completed);
        assert_eq!(progress.current_station(), None);
    }

    #[test]
    fn partially_passed_is_running_at_last_passed() {
        let rows = [row("A", "통과"), row("B", "출발"), row("C", "대기")];
        let progress = Progress::infer(&rows);

        assert_eq!(progress.status(), TrainStatus::Running);
        assert_eq!(progress.current_station(), Some("B"));
    }

    #[test]
    fn non_contiguous_passed_uses_last_in_document_order() {
        let rows = [row("A", "통과"), row("B", "대기"), row("C", "출발"), row("D", "")];
        assert_eq!(Progress::infer(&rows).current_station(), Some("C"));
    }

    #[test]
    fn none_passed_is_scheduled() {
        let rows = [row("A", "대기"), row("B", "")];
        assert_eq!(Progress::infer(&rows), Progress::Scheduled);
    }

    #[test]
    fn marker_matches_as_substring() {
        assert!(row("A", "10:02 출발").is_passed());
        assert!(row("A", "정상통과").is_passed());
        assert!(!row("A", "도착").is_passed());
    }

    #[test]
    fn serializes_current_station_only_when_running() {
        let at = DateTime::parse_from_rfc3339("2026-10-14T03:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let running =
            TrainInfoResult::new("3001", "20261014", vec![row("A", "통과"), row("B", "")], at);
        let json = serde_json::to_value(&running).unwrap();
        assert_eq!(json["trainNo"], "3001");
        assert_eq!(json["trainDate"], "20261014");
        assert_eq!(json["status"], "running");
        assert_eq!(json["currentStation"], "A");
        assert_eq!(json["stations"][1]["name"], "B");
        assert_eq!(json["lastUpdate"], "2026-10-14T03:00:00Z");

        let scheduled = TrainInfoResult::new("3001", "20261014", vec![row("A", "")], at);
        let json = serde_json::to_value(&scheduled).unwrap();
        assert_eq!(json["status"], "scheduled");
        assert!(json.get("currentStation").is_none());
    }
}
