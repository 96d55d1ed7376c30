//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Required live lookup parameters are missing or empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("운행일(trainDate)과 열차번호(trainNo)가 필요합니다")]
pub struct ValidationError;

/// Query for `/api/train-info`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainInfoRequest {
    /// Operating date, as the upstream form expects it (e.g. `20261014`)
    pub train_date: Option<String>,

    /// Train number
    pub train_no: Option<String>,
}

impl TrainInfoRequest {
    /// Both parameters, or a validation error if either is absent or empty.
    pub fn required(&self) -> Result<(&str, &str), ValidationError> {
        match (non_empty(&self.train_date), non_empty(&self.train_no)) {
            (Some(date), Some(no)) => Ok((date, no)),
            _ => Err(ValidationError),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Optional free-text query for the search endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    pub query: Option<String>,
}

/// Response for `/health`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub data_loaded: DataLoaded,
}

/// Loaded record counts.
#[derive(Debug, Serialize)]
pub struct DataLoaded {
    pub trains: usize,
    pub stations: usize,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable summary
    pub error: String,

    /// Underlying cause, for live lookup failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
