//! Live-status source traits.

use std::future::Future;

use crate::domain::TrainInfoResult;
use crate::korail::ScrapeError;
use crate::nxlogis::RemoteApiError;

/// The preferred source: yields a fully typed, inferred status.
pub trait PrimarySource: Send + Sync {
    fn fetch_live_status(
        &self,
        train_date: &str,
        train_no: &str,
    ) -> impl Future<Output = Result<TrainInfoResult, ScrapeError>> + Send;
}

/// The fallback source: yields whatever body the remote returns.
pub trait SecondarySource: Send + Sync {
    fn fetch_live_status(
        &self,
        train_date: &str,
        train_no: &str,
    ) -> impl Future<Output = Result<serde_json::Value, RemoteApiError>> + Send;
}
