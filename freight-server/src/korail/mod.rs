//! Primary live-status source: the Korail logistics mobile site.
//!
//! The site has no API. A headless browser loads the train info search
//! form, submits the operating date and train number, and reads the
//! station table from the result page.

mod browser;
mod chrome;
mod error;
mod scraper;

pub use browser::{BrowserLauncher, BrowserSession};
pub use chrome::{ChromeLauncher, ChromeSession};
pub use error::ScrapeError;
pub use scraper::{
    DEFAULT_FORM_URL, DEFAULT_STEP_TIMEOUT, KorailConfig, KorailScraper, parse_station_rows,
};
