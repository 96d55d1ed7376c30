//! In-memory reference tables.

use crate::domain::{ScheduleRecord, StationRecord, TrainSummary};

/// Number of schedules returned by an open search.
pub const DEFAULT_SCHEDULE_LIMIT: usize = 20;

/// Number of stations returned by an open search.
pub const DEFAULT_STATION_LIMIT: usize = 50;

/// Freight train schedules, in file order.
#[derive(Debug, Clone, Default)]
pub struct ScheduleTable {
    records: Vec<ScheduleRecord>,
}

impl ScheduleTable {
    pub fn new(records: Vec<ScheduleRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ScheduleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Search by train number.
    ///
    /// With no query (or an empty one) returns the first
    /// [`DEFAULT_SCHEDULE_LIMIT`] records. Otherwise returns every record
    /// whose train number contains `query`, case-sensitively.
    pub fn search(&self, query: Option<&str>) -> Vec<ScheduleRecord> {
        match query.filter(|q| !q.is_empty()) {
            None => self
                .records
                .iter()
                .take(DEFAULT_SCHEDULE_LIMIT)
                .cloned()
                .collect(),
            Some(q) => self
                .records
                .iter()
                .filter(|r| r.train_no.contains(q))
                .cloned()
                .collect(),
        }
    }

    /// Find the record with exactly this train number.
    pub fn find(&self, train_no: &str) -> Option<&ScheduleRecord> {
        self.records.iter().find(|r| r.train_no == train_no)
    }

    /// One summary per record, in table order.
    pub fn summaries(&self) -> Vec<TrainSummary> {
        self.records.iter().map(ScheduleRecord::summary).collect()
    }
}

/// Freight station directory, in file order.
#[derive(Debug, Clone, Default)]
pub struct StationTable {
    records: Vec<StationRecord>,
}

impl StationTable {
    pub fn new(records: Vec<StationRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[StationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Search by station name.
    ///
    /// With no query (or an empty one) returns the first
    /// [`DEFAULT_STATION_LIMIT`] records. Records without a name are
    /// excluded from substring matches.
    pub fn search(&self, query: Option<&str>) -> Vec<StationRecord> {
        match query.filter(|q| !q.is_empty()) {
            None => self
                .records
                .iter()
                .take(DEFAULT_STATION_LIMIT)
                .cloned()
                .collect(),
            Some(q) => self
                .records
                .iter()
                .filter(|s| s.name_contains(q))
                .cloned()
                .collect(),
        }
    }
}
