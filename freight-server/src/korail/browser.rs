//! Browser automation seam.
//!
//! The scraper only needs a handful of page operations. They are
//! expressed as traits so the scrape protocol can run against a real
//! headless Chrome or a scripted test double.

use std::future::Future;

use super::error::ScrapeError;

/// Starts isolated browser sessions. One session serves one scrape.
pub trait BrowserLauncher: Send + Sync {
    type Session: BrowserSession;

    /// Start a new session with a blank page.
    fn launch(&self) -> impl Future<Output = Result<Self::Session, ScrapeError>> + Send;
}

/// One live browser session with a single page.
pub trait BrowserSession: Send {
    /// Navigate to `url` and wait for the page to settle.
    fn goto(&mut self, url: &str) -> impl Future<Output = Result<(), ScrapeError>> + Send;

    /// Type `text` into the input matching `selector`.
    fn type_into(
        &mut self,
        selector: &str,
        text: &str,
    ) -> impl Future<Output = Result<(), ScrapeError>> + Send;

    /// Click the element matching `selector` and wait for the navigation
    /// it triggers. Fails unless both the click and the navigation succeed.
    fn submit(&mut self, selector: &str) -> impl Future<Output = Result<(), ScrapeError>> + Send;

    /// Text content of the `td` cells of every `table tr` on the page, in
    /// document order. Rows without cells are returned empty.
    fn table_rows(&mut self) -> impl Future<Output = Result<Vec<Vec<String>>, ScrapeError>> + Send;

    /// Shut the session down and release the browser.
    fn close(self) -> impl Future<Output = Result<(), ScrapeError>> + Send;
}
