//! Two-source live status resolution.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::domain::TrainInfoResult;

use super::source::{PrimarySource, SecondarySource};

/// Message carried by [`ResolveError::AllSourcesFailed`].
pub const ALL_SOURCES_FAILED: &str = "열차 정보를 가져올 수 없습니다";

/// Live status of a train, tagged by where it came from.
///
/// Serializes as the bare inner value, so clients see either the typed
/// scrape result or the fallback body unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TrainInfo {
    /// Scraped from the Korail site, with inferred status.
    Live(TrainInfoResult),
    /// Body returned by the nxlogis API. Its shape is not verified and
    /// need not match [`TrainInfoResult`].
    Fallback(serde_json::Value),
}

/// Live status could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Both sources failed. Their individual errors are logged only.
    #[error("{}", ALL_SOURCES_FAILED)]
    AllSourcesFailed,
}

/// Resolves a train's live status from a primary and a secondary source.
///
/// Each source is tried at most once per call, in order.
#[derive(Debug, Clone)]
pub struct TrainInfoResolver<P, S> {
    primary: P,
    secondary: S,
}

impl<P: PrimarySource, S: SecondarySource> TrainInfoResolver<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }

    pub async fn resolve(&self, train_date: &str, train_no: &str) -> Result<TrainInfo, ResolveError> {
        match self.primary.fetch_live_status(train_date, train_no).await {
            Ok(result) => return Ok(TrainInfo::Live(result)),
            Err(e) => warn!(
                train_no,
                train_date,
                error = %e,
                "primary source failed, trying secondary"
            ),
        }

        match self.secondary.fetch_live_status(train_date, train_no).await {
            Ok(body) => {
                info!(train_no, train_date, "resolved from secondary source");
                Ok(TrainInfo::Fallback(body))
            }
            Err(e) => {
                error!(train_no, train_date, error = %e, "all live status sources failed");
                Err(ResolveError::AllSourcesFailed)
            }
        }
    }
}
