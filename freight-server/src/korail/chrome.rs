//! Headless Chrome sessions via the DevTools protocol.

use chromiumoxide::cdp::browser_protocol::page::{EventLifecycleEvent, SetLifecycleEventsEnabledParams};
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::error::CdpError;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::stream::{BoxStream, Stream, StreamExt};
use tokio::task::JoinHandle;
use tracing::debug;

use super::browser::{BrowserLauncher, BrowserSession};
use super::error::ScrapeError;

/// Chrome flags needed to run inside containers.
const DEFAULT_ARGS: [&str; 4] = [
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
];

/// Collects the cell texts of every table row on the page.
const TABLE_ROWS_JS: &str = "Array.from(document.querySelectorAll('table tr')).map(row => \
     Array.from(row.querySelectorAll('td')).map(cell => cell.textContent))";

/// Lifecycle event that starts a new document in a frame.
const DOCUMENT_INIT_EVENT: &str = "init";
/// Lifecycle event fired once at most two requests remain in flight.
const NETWORK_IDLE_EVENT: &str = "networkAlmostIdle";

/// Launches a fresh headless Chrome process per session.
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    args: Vec<String>,
}

impl ChromeLauncher {
    pub fn new() -> Self {
        Self {
            args: DEFAULT_ARGS.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl Default for ChromeLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserLauncher for ChromeLauncher {
    type Session = ChromeSession;

    async fn launch(&self) -> Result<ChromeSession, ScrapeError> {
        let config = self
            .args
            .iter()
            .fold(BrowserConfig::builder(), |builder, arg| builder.arg(arg.as_str()))
            .build()
            .map_err(ScrapeError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScrapeError::Launch(e.to_string()))?;

        // The CDP connection is only serviced while the handler is polled.
        // Individual event errors are not fatal; the stream ends when the
        // browser goes away.
        let handler = tokio::spawn(async move { while handler.next().await.is_some() {} });

        // From here on `browser` kills the Chrome process if dropped, so an
        // early return cannot leak it.
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScrapeError::Session(e.to_string()))?;
        page.execute(SetLifecycleEventsEnabledParams::new(true))
            .await
            .map_err(|e| ScrapeError::Session(e.to_string()))?;

        debug!("launched headless chrome session");
        Ok(ChromeSession {
            browser,
            page,
            handler,
        })
    }
}

/// A running Chrome process with one open page.
///
/// Dropping the session without calling [`BrowserSession::close`] still
/// kills the browser process.
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromeSession {
    async fn find(&self, selector: &str) -> Result<chromiumoxide::Element, ScrapeError> {
        self.page
            .find_element(selector)
            .await
            .map_err(|e| find_error(selector, e))
    }

    /// Names of main frame lifecycle events from now on.
    async fn lifecycle_events(&self) -> Result<BoxStream<'static, String>, ScrapeError> {
        let main_frame = self
            .page
            .mainframe()
            .await
            .map_err(|e| ScrapeError::Session(e.to_string()))?;
        let events = self
            .page
            .event_listener::<EventLifecycleEvent>()
            .await
            .map_err(|e| ScrapeError::Session(e.to_string()))?;

        Ok(events
            .filter_map(move |event| {
                let in_main_frame = main_frame.as_ref().is_none_or(|id| *id == event.frame_id);
                futures::future::ready(in_main_frame.then(|| event.name.clone()))
            })
            .boxed())
    }
}

fn find_error(selector: &str, err: CdpError) -> ScrapeError {
    match err {
        // A selector miss comes back as a protocol error on the node lookup.
        CdpError::NotFound | CdpError::Chrome(_) => ScrapeError::ElementNotFound {
            selector: selector.to_string(),
        },
        other => ScrapeError::Session(other.to_string()),
    }
}

/// Wait for a new document to start and then reach network idle.
async fn until_network_idle(events: impl Stream<Item = String>) -> Result<(), ScrapeError> {
    let mut events = std::pin::pin!(events);
    let mut document_started = false;
    while let Some(name) = events.next().await {
        match name.as_str() {
            DOCUMENT_INIT_EVENT => document_started = true,
            NETWORK_IDLE_EVENT if document_started => return Ok(()),
            _ => {}
        }
    }
    Err(ScrapeError::Navigation(
        "page closed before the network went idle".into(),
    ))
}

impl BrowserSession for ChromeSession {
    async fn goto(&mut self, url: &str) -> Result<(), ScrapeError> {
        let events = self.lifecycle_events().await?;
        self.page
            .goto(url)
            .await
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?;
        until_network_idle(events).await
    }

    async fn type_into(&mut self, selector: &str, text: &str) -> Result<(), ScrapeError> {
        let element = self.find(selector).await?;
        element
            .click()
            .await
            .map_err(|e| ScrapeError::Session(e.to_string()))?;
        element
            .type_str(text)
            .await
            .map_err(|e| ScrapeError::Session(e.to_string()))?;
        Ok(())
    }

    async fn submit(&mut self, selector: &str) -> Result<(), ScrapeError> {
        let button = self.find(selector).await?;
        let events = self.lifecycle_events().await?;
        let click = async { button.click().await.map(|_| ()) };
        let navigation = async { self.page.wait_for_navigation().await.map(|_| ()) };
        futures::try_join!(click, navigation)
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?;
        until_network_idle(events).await
    }

    async fn table_rows(&mut self) -> Result<Vec<Vec<String>>, ScrapeError> {
        let params = EvaluateParams::builder()
            .expression(TABLE_ROWS_JS)
            .return_by_value(true)
            .build()
            .map_err(ScrapeError::Extraction)?;

        self.page
            .evaluate_expression(params)
            .await
            .map_err(|e| ScrapeError::Extraction(e.to_string()))?
            .into_value()
            .map_err(|e| ScrapeError::Extraction(e.to_string()))
    }

    async fn close(mut self) -> Result<(), ScrapeError> {
        let closed = self.browser.close().await;
        let exited = self.browser.wait().await;
        let _ = self.handler.await;

        closed.map_err(|e| ScrapeError::Session(e.to_string()))?;
        exited.map_err(|e| ScrapeError::Session(e.to_string()))?;
        debug!("closed headless chrome session");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn names(events: &[&str]) -> impl Stream<Item = String> {
        stream::iter(events.iter().map(|e| e.to_string()).collect::<Vec<_>>())
    }

    #[tokio::test]
    async fn idle_after_new_document_completes_wait() {
        let events = names(&["init", "DOMContentLoaded", "load", "networkAlmostIdle"]);
        assert_eq!(until_network_idle(events).await, Ok(()));
    }

    #[tokio::test]
    async fn idle_from_previous_document_is_ignored() {
        let events = names(&["networkAlmostIdle", "load"]);
        assert!(matches!(
            until_network_idle(events).await,
            Err(ScrapeError::Navigation(_))
        ));
    }

    #[tokio::test]
    async fn load_alone_does_not_complete_wait() {
        let events = names(&["init", "DOMContentLoaded", "load"]);
        assert!(until_network_idle(events).await.is_err());
    }

    #[test]
    fn missing_node_is_element_not_found() {
        assert_eq!(
            find_error("#trainNo", CdpError::NotFound),
            ScrapeError::ElementNotFound {
                selector: "#trainNo".into()
            }
        );
    }

    #[test]
    fn transport_failure_is_session_error() {
        assert!(matches!(
            find_error("#trainNo", CdpError::NoResponse),
            ScrapeError::Session(_)
        ));
    }
}
