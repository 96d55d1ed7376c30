//! Live status scrape of the Korail logistics mobile site.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::{StationStatusRow, TrainInfoResult};
use crate::live::PrimarySource;

use super::browser::{BrowserLauncher, BrowserSession};
use super::error::ScrapeError;

/// Default URL of the train info search form.
pub const DEFAULT_FORM_URL: &str = "https://mlogis.korail.com/searchmobiletraininfoform.do";

/// Default bound on each page step.
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(30);

const DATE_FIELD: &str = r#"input[name="trainDate"]"#;
const TRAIN_NO_FIELD: &str = r#"input[name="trainNo"]"#;
const SUBMIT_BUTTON: &str = r#"button[type="submit"]"#;

/// Configuration for the Korail scraper.
#[derive(Debug, Clone)]
pub struct KorailConfig {
    /// URL of the search form
    pub form_url: String,
    /// Bound on each page step (navigation, input, submission, extraction)
    pub step_timeout: Duration,
}

impl KorailConfig {
    pub fn new() -> Self {
        Self {
            form_url: DEFAULT_FORM_URL.to_string(),
            step_timeout: DEFAULT_STEP_TIMEOUT,
        }
    }

    /// Set a custom form URL (for testing).
    pub fn with_form_url(mut self, url: impl Into<String>) -> Self {
        self.form_url = url.into();
        self
    }

    /// Set the per-step timeout.
    pub fn with_step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = timeout;
        self
    }
}

impl Default for KorailConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Scrapes a train's live status through a browser session.
///
/// Each call launches its own session, and that session is closed before
/// the call returns, whether or not the scrape succeeded.
#[derive(Debug, Clone)]
pub struct KorailScraper<L> {
    launcher: L,
    config: KorailConfig,
}

impl<L: BrowserLauncher> KorailScraper<L> {
    pub fn new(launcher: L, config: KorailConfig) -> Self {
        Self { launcher, config }
    }

    /// Scrape the live status of `train_no` on `train_date`.
    pub async fn scrape(
        &self,
        train_date: &str,
        train_no: &str,
    ) -> Result<TrainInfoResult, ScrapeError> {
        info!(train_no, train_date, "scraping Korail live status");

        let mut session = self.launcher.launch().await?;
        let outcome = self.run_form(&mut session, train_date, train_no).await;
        if let Err(e) = session.close().await {
            warn!(error = %e, "failed to close browser session");
        }

        let stations = parse_station_rows(outcome?);
        info!(train_no, stations = stations.len(), "Korail scrape finished");

        Ok(TrainInfoResult::new(
            train_no,
            train_date,
            stations,
            Utc::now(),
        ))
    }

    /// Fill in and submit the search form, returning the raw table cells.
    async fn run_form(
        &self,
        session: &mut L::Session,
        train_date: &str,
        train_no: &str,
    ) -> Result<Vec<Vec<String>>, ScrapeError> {
        self.bounded("page load", session.goto(&self.config.form_url))
            .await?;
        self.bounded("date input", session.type_into(DATE_FIELD, train_date))
            .await?;
        self.bounded("train number input", session.type_into(TRAIN_NO_FIELD, train_no))
            .await?;
        self.bounded("form submission", session.submit(SUBMIT_BUTTON))
            .await?;
        self.bounded("result extraction", session.table_rows())
            .await
    }

    async fn bounded<T>(
        &self,
        step: &'static str,
        fut: impl Future<Output = Result<T, ScrapeError>>,
    ) -> Result<T, ScrapeError> {
        let timeout = self.config.step_timeout;
        tokio::time::timeout(timeout, fut)
            .await
            .map_err(|_| ScrapeError::Timeout { step, timeout })?
    }
}

impl<L: BrowserLauncher> PrimarySource for KorailScraper<L> {
    async fn fetch_live_status(
        &self,
        train_date: &str,
        train_no: &str,
    ) -> Result<TrainInfoResult, ScrapeError> {
        self.scrape(train_date, train_no).await
    }
}

/// Turn raw table cells into station rows.
///
/// The first row is the table header and is skipped. Rows with fewer than
/// four cells are ignored; the rest yield (name, arrival, departure,
/// status) from their first four cells, trimmed, in page order.
pub fn parse_station_rows(rows: Vec<Vec<String>>) -> Vec<StationStatusRow> {
    rows.into_iter()
        .skip(1)
        .filter(|cells| cells.len() >= 4)
        .map(|cells| StationStatusRow {
            name: cells[0].trim().to_string(),
            arrival: cells[1].trim().to_string(),
            departure: cells[2].trim().to_string(),
            status: cells[3].trim().to_string(),
        })
        .collect()
}
