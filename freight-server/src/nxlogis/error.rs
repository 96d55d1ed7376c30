//! nxlogis API error types.

/// Errors from the nxlogis.kr train API.
#[derive(Debug, thiserror::Error)]
pub enum RemoteApiError {
    /// The request did not complete within the client timeout
    #[error("request timed out")]
    Timeout,

    /// HTTP request failed (connection, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// API returned a non-success status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },
}

impl From<reqwest::Error> for RemoteApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteApiError::Timeout
        } else {
            RemoteApiError::Http(err)
        }
    }
}
