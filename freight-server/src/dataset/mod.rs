//! Bundled reference datasets: freight train schedules and stations.
//!
//! Both tables are loaded from EUC-KR CSV files at startup and are
//! read-only afterwards. Queries go through [`Datasets`], which rejects
//! them until loading has finished.

mod error;
mod loader;
mod store;
mod table;

pub use error::{DatasetError, QueryError};
pub use loader::{SCHEDULE_FILE, STATION_FILE, decode_euc_kr, load_schedules, load_stations};
pub use store::Datasets;
pub use table::{DEFAULT_SCHEDULE_LIMIT, DEFAULT_STATION_LIMIT, ScheduleTable, StationTable};
