//! HTTP route handlers.

use std::any::Any;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tracing::{error, warn};

use crate::dataset::QueryError;
use crate::domain::{ScheduleRecord, StationRecord, TrainSummary};
use crate::live::{PrimarySource, ResolveError, SecondarySource, TrainInfo};

use super::dto::*;
use super::state::AppState;

/// Summary shown when a live lookup fails.
const LIVE_LOOKUP_FAILED: &str = "열차 정보를 가져오는데 실패했습니다";
const TRAIN_NOT_FOUND: &str = "해당 열차를 찾을 수 없습니다";
const DATA_LOADING: &str = "데이터를 불러오는 중입니다. 잠시 후 다시 시도해 주세요";
const UNEXPECTED: &str = "요청 처리 중 오류가 발생했습니다";

/// Create the application router.
pub fn create_router<P, S>(state: AppState<P, S>) -> Router
where
    P: PrimarySource + 'static,
    S: SecondarySource + 'static,
{
    Router::new()
        .route("/health", get(health::<P, S>))
        .route("/api/train-info", get(train_info::<P, S>))
        .route("/api/trains", get(list_trains::<P, S>))
        .route("/api/trains/search", get(search_trains::<P, S>))
        .route("/api/trains/:train_no", get(get_train::<P, S>))
        .route("/api/stations", get(search_stations::<P, S>))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check with loaded record counts.
async fn health<P, S>(State(state): State<AppState<P, S>>) -> Json<HealthResponse> {
    let (trains, stations) = state.datasets.counts();
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
        data_loaded: DataLoaded { trains, stations },
    })
}

/// Live status of one train on one date.
async fn train_info<P, S>(
    State(state): State<AppState<P, S>>,
    query: Result<Query<TrainInfoRequest>, QueryRejection>,
) -> Result<Json<TrainInfo>, AppError>
where
    P: PrimarySource,
    S: SecondarySource,
{
    let Query(req) = query?;
    let (train_date, train_no) = req.required()?;
    let info = state.resolver.resolve(train_date, train_no).await?;
    Ok(Json(info))
}

/// Search schedules by train number.
async fn search_trains<P, S>(
    State(state): State<AppState<P, S>>,
    query: Result<Query<SearchRequest>, QueryRejection>,
) -> Result<Json<Vec<ScheduleRecord>>, AppError> {
    let Query(req) = query?;
    let results = state.datasets.search_schedules(req.query.as_deref())?;
    Ok(Json(results))
}

/// One schedule by exact train number.
async fn get_train<P, S>(
    State(state): State<AppState<P, S>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ScheduleRecord>, AppError> {
    let Path(train_no) = path?;
    let record = state.datasets.get_schedule_by_train_no(&train_no)?;
    Ok(Json(record))
}

/// Search freight stations by name.
async fn search_stations<P, S>(
    State(state): State<AppState<P, S>>,
    query: Result<Query<SearchRequest>, QueryRejection>,
) -> Result<Json<Vec<StationRecord>>, AppError> {
    let Query(req) = query?;
    let results = state.datasets.search_stations(req.query.as_deref())?;
    Ok(Json(results))
}

/// Every train number with its route, for autocomplete.
async fn list_trains<P, S>(
    State(state): State<AppState<P, S>>,
) -> Result<Json<Vec<TrainSummary>>, AppError> {
    let trains = state.datasets.list_all_trains()?;
    Ok(Json(trains))
}

/// Turn a handler panic into a JSON 500.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    AppError::Internal {
        message: format!("handler panicked: {detail}"),
    }
    .into_response()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
    /// Live lookup failed; `cause` is shown to the client.
    LiveLookup { cause: String },
    Internal { message: String },
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::NotReady => AppError::Unavailable {
                message: e.to_string(),
            },
            QueryError::NotFound { .. } => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        AppError::LiveLookup {
            cause: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Internal detail is logged here; clients get the fixed wording.
        let (status, body) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "bad request");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: message,
                        message: None,
                    },
                )
            }
            AppError::NotFound { message } => {
                warn!(%message, "not found");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: TRAIN_NOT_FOUND.to_string(),
                        message: None,
                    },
                )
            }
            AppError::Unavailable { message } => {
                warn!(%message, "service unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse {
                        error: DATA_LOADING.to_string(),
                        message: None,
                    },
                )
            }
            AppError::LiveLookup { cause } => {
                error!(%cause, "live lookup failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: LIVE_LOOKUP_FAILED.to_string(),
                        message: Some(cause),
                    },
                )
            }
            AppError::Internal { message } => {
                error!(%message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: UNEXPECTED.to_string(),
                        message: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
