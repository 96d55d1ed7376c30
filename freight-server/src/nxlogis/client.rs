//! nxlogis.kr train API client.

use std::time::Duration;

use tracing::info;

use crate::live::SecondarySource;

use super::error::RemoteApiError;

/// Default endpoint of the train lookup API.
pub const DEFAULT_BASE_URL: &str = "https://nxlogis.kr/api/train";

/// Configuration for the nxlogis client.
#[derive(Debug, Clone)]
pub struct NxLogisConfig {
    /// Endpoint URL
    pub base_url: String,
    /// Total request timeout
    pub timeout: Duration,
}

impl NxLogisConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Set a custom endpoint URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for NxLogisConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the nxlogis.kr train API.
///
/// The response schema is not documented, so bodies are handed back as
/// loosely typed JSON rather than parsed into domain types.
#[derive(Debug, Clone)]
pub struct NxLogisClient {
    http: reqwest::Client,
    base_url: String,
}

impl NxLogisClient {
    /// Create a new client.
    pub fn new(config: NxLogisConfig) -> Result<Self, RemoteApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the train's status body.
    ///
    /// A JSON body is returned as parsed; any other body is returned as a
    /// JSON string holding the raw text.
    pub async fn fetch_train(
        &self,
        train_date: &str,
        train_no: &str,
    ) -> Result<serde_json::Value, RemoteApiError> {
        info!(train_no, train_date, "querying nxlogis train API");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("date", train_date), ("no", train_no)])
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteApiError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body)))
    }
}

impl SecondarySource for NxLogisClient {
    async fn fetch_live_status(
        &self,
        train_date: &str,
        train_no: &str,
    ) -> Result<serde_json::Value, RemoteApiError> {
        self.fetch_train(train_date, train_no).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::Query, http::StatusCode, routing::get};
    use std::collections::HashMap;

    #[test]
    fn config_defaults() {
        let config = NxLogisConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn config_with_base_url() {
        let config = NxLogisConfig::new().with_base_url("http://localhost:8080/api/train");
        assert_eq!(config.base_url, "http://localhost:8080/api/train");
    }

    /// Serve `app` on an ephemeral local port and return the train URL.
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/api/train")
    }

    fn client(url: String, timeout: Duration) -> NxLogisClient {
        NxLogisClient::new(NxLogisConfig::new().with_base_url(url).with_timeout(timeout)).unwrap()
    }

    #[tokio::test]
    async fn sends_date_and_number_and_returns_body() {
        let app = Router::new().route(
            "/api/train",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                Json(serde_json::json!({
                    "date": params.get("date"),
                    "no": params.get("no"),
                    "position": "의왕",
                }))
            }),
        );
        let client = client(serve(app).await, Duration::from_secs(5));

        let body = client.fetch_train("20261014", "3001").await.unwrap();
        assert_eq!(body["date"], "20261014");
        assert_eq!(body["no"], "3001");
        assert_eq!(body["position"], "의왕");
    }

    #[tokio::test]
    async fn non_json_body_is_returned_as_string() {
        let app = Router::new().route("/api/train", get(|| async { "운행정보 없음" }));
        let client = client(serve(app).await, Duration::from_secs(5));

        let body = client.fetch_train("20261014", "3001").await.unwrap();
        assert_eq!(body, serde_json::Value::String("운행정보 없음".into()));
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let app = Router::new().route(
            "/api/train",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let client = client(serve(app).await, Duration::from_secs(5));

        let err = client.fetch_train("20261014", "3001").await.unwrap_err();
        match err {
            RemoteApiError::Status { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let app = Router::new().route(
            "/api/train",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let client = client(serve(app).await, Duration::from_millis(100));

        let err = client.fetch_train("20261014", "3001").await.unwrap_err();
        assert!(matches!(err, RemoteApiError::Timeout));
    }

    #[tokio::test]
    async fn refused_connection_is_http_error() {
        // Bind then drop to get a local port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = client(format!("http://{addr}/api/train"), Duration::from_secs(5));

        let err = client.fetch_train("20261014", "3001").await.unwrap_err();
        match err {
            RemoteApiError::Http(e) => assert!(e.is_connect(), "unexpected: {e}"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
