//! Domain types for freight train lookup.
//!
//! Schedule and station records mirror the rows of the bundled Korail
//! reference files. Live status types describe one scrape of a train's
//! progress and the status derived from it.

mod schedule;
mod station;
mod status;

pub use schedule::{
    DESTINATION_COLUMN, LINE_COLUMN, ORIGIN_COLUMN, ScheduleRecord, TRAIN_NO_COLUMN, TrainSummary,
};
pub use station::{STATION_NAME_COLUMN, StationRecord};
pub use status::{PASSED_MARKERS, Progress, StationStatusRow, TrainInfoResult, TrainStatus};
