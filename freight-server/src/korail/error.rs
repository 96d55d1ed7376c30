//! Korail scrape error types.

use std::time::Duration;

/// Errors from a live-status scrape of the Korail mobile site.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScrapeError {
    /// The browser process could not be started
    #[error("failed to launch browser: {0}")]
    Launch(String),

    /// A page step did not finish in time
    #[error("{step} timed out after {timeout:?}")]
    Timeout {
        step: &'static str,
        timeout: Duration,
    },

    /// A form field or button is missing from the page
    #[error("element not found: {selector}")]
    ElementNotFound { selector: String },

    /// Navigation to or from the form failed
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// The result table could not be read
    #[error("failed to extract result table: {0}")]
    Extraction(String),

    /// Any other browser session failure
    #[error("browser session error: {0}")]
    Session(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ScrapeError::Timeout {
            step: "page load",
            timeout: Duration::from_secs(30),
        };
        assert_eq!(err.to_string(), "page load timed out after 30s");

        let err = ScrapeError::ElementNotFound {
            selector: "input[name=\"trainNo\"]".into(),
        };
        assert_eq!(
            err.to_string(),
            "element not found: input[name=\"trainNo\"]"
        );
    }
}
