//! Shared handle to the loaded reference tables.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use tracing::{error, info};

use crate::domain::{ScheduleRecord, StationRecord, TrainSummary};

use super::error::{DatasetError, QueryError};
use super::loader::{SCHEDULE_FILE, STATION_FILE, load_schedules, load_stations};
use super::table::{ScheduleTable, StationTable};

#[derive(Debug)]
struct Tables {
    schedules: ScheduleTable,
    stations: StationTable,
}

/// Thread-safe, cheaply clonable access to the reference tables.
///
/// The tables are published once, after both startup loads have
/// finished. Until then every query fails with [`QueryError::NotReady`];
/// afterwards they are read-only.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    inner: Arc<OnceLock<Tables>>,
}

impl Datasets {
    /// Create a handle whose tables are not loaded yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle that is ready immediately with the given tables.
    pub fn with_tables(schedules: ScheduleTable, stations: StationTable) -> Self {
        let datasets = Self::new();
        datasets.publish(schedules, stations);
        datasets
    }

    /// Publish the tables. Only the first call has any effect.
    ///
    /// Returns `false` if tables were already published.
    pub fn publish(&self, schedules: ScheduleTable, stations: StationTable) -> bool {
        self.inner.set(Tables { schedules, stations }).is_ok()
    }

    /// Whether the tables have been published.
    pub fn is_ready(&self) -> bool {
        self.inner.get().is_some()
    }

    /// Number of loaded (schedules, stations); zero before publication.
    pub fn counts(&self) -> (usize, usize) {
        self.inner
            .get()
            .map(|t| (t.schedules.len(), t.stations.len()))
            .unwrap_or((0, 0))
    }

    fn tables(&self) -> Result<&Tables, QueryError> {
        self.inner.get().ok_or(QueryError::NotReady)
    }

    /// Load both files from `data_dir` concurrently, then publish.
    ///
    /// A file that fails to load is logged and published as an empty
    /// table, so the service always becomes ready.
    pub async fn load_from_dir(&self, data_dir: &Path) {
        let schedule_path = data_dir.join(SCHEDULE_FILE);
        let station_path = data_dir.join(STATION_FILE);

        let (schedules, stations) = tokio::join!(
            run_blocking(move || load_schedules(&schedule_path)),
            run_blocking(move || load_stations(&station_path)),
        );

        let schedules = schedules.unwrap_or_else(|e| {
            error!(error = %e, "failed to load train schedules");
            ScheduleTable::default()
        });
        info!(count = schedules.len(), "loaded freight train schedules");

        let stations = stations.unwrap_or_else(|e| {
            error!(error = %e, "failed to load freight stations");
            StationTable::default()
        });
        info!(count = stations.len(), "loaded freight stations");

        if !self.publish(schedules, stations) {
            error!("datasets were already published; discarding reload");
        }
    }

    /// Search schedules by train number substring.
    pub fn search_schedules(&self, query: Option<&str>) -> Result<Vec<ScheduleRecord>, QueryError> {
        Ok(self.tables()?.schedules.search(query))
    }

    /// Look up the schedule with exactly this train number.
    pub fn get_schedule_by_train_no(&self, train_no: &str) -> Result<ScheduleRecord, QueryError> {
        self.tables()?
            .schedules
            .find(train_no)
            .cloned()
            .ok_or_else(|| QueryError::NotFound {
                train_no: train_no.to_string(),
            })
    }

    /// Search stations by name substring.
    pub fn search_stations(&self, query: Option<&str>) -> Result<Vec<StationRecord>, QueryError> {
        Ok(self.tables()?.stations.search(query))
    }

    /// Summaries of every schedule, for autocomplete.
    pub fn list_all_trains(&self) -> Result<Vec<TrainSummary>, QueryError> {
        Ok(self.tables()?.schedules.summaries())
    }
}

/// Run a blocking load on the blocking thread pool.
async fn run_blocking<T, F>(f: F) -> Result<T, DatasetError>
where
    F: FnOnce() -> Result<T, DatasetError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DatasetError::Task(e.to_string()))?
}
