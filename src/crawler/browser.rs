//! Scripted-rendering fetch strategy
//!
//! The crawler never talks to a browser library directly. It drives a
//! [`BrowserDriver`] through [`RenderedFetcher`], which owns the driver for
//! the lifetime of a session and releases it exactly once.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{FetchError, PageFetcher};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors reported by a browser driver
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Browser failed to start: {0}")]
    Launch(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Timed out after {timeout:?} waiting for '{selector}'")]
    Timeout { selector: String, timeout: Duration },

    #[error("Browser session already closed")]
    Closed,

    #[error("Browser task failed: {0}")]
    Task(String),
}

/// A headless browser capability
///
/// Calls are blocking; [`RenderedFetcher`] moves them onto the blocking
/// thread pool.
pub trait BrowserDriver: Send + 'static {
    /// Loads `url`, waits up to `timeout` for `wait_for` to match, and returns
    /// the rendered document
    fn load(&mut self, url: &str, wait_for: &str, timeout: Duration)
        -> Result<String, RenderError>;

    /// Shuts the browser down
    fn quit(&mut self);
}

/// Fetches pages by rendering them in a browser
///
/// Render failures and timeouts yield empty content, which the session treats
/// as "no content" for that URL.
pub struct RenderedFetcher<D: BrowserDriver> {
    driver: Option<D>,
    wait_selector: String,
    timeout: Duration,
}

impl<D: BrowserDriver> RenderedFetcher<D> {
    /// Wraps a driver with the wait selector and timeout from the configuration
    pub fn new(driver: D, config: &CrawlerConfig) -> Self {
        Self {
            driver: Some(driver),
            wait_selector: config.wait_selector.clone(),
            timeout: Duration::from_secs(config.render_timeout_secs),
        }
    }

    /// Returns true once the driver has been released
    pub fn is_closed(&self) -> bool {
        self.driver.is_none()
    }
}

#[async_trait]
impl<D: BrowserDriver> PageFetcher for RenderedFetcher<D> {
    fn name(&self) -> &'static str {
        "rendered"
    }

    async fn fetch(&mut self, url: &Url) -> Result<String, FetchError> {
        let mut driver = self.driver.take().ok_or_else(|| FetchError::Render {
            url: url.to_string(),
            source: RenderError::Closed,
        })?;

        let target = url.to_string();
        let selector = self.wait_selector.clone();
        let timeout = self.timeout;

        let joined = tokio::task::spawn_blocking(move || {
            let result = driver.load(&target, &selector, timeout);
            (driver, result)
        })
        .await;

        let (driver, result) = match joined {
            Ok(pair) => pair,
            Err(e) => {
                // The driver was lost with the task; the session cannot continue rendering.
                return Err(FetchError::Render {
                    url: url.to_string(),
                    source: RenderError::Task(e.to_string()),
                });
            }
        };
        self.driver = Some(driver);

        match result {
            Ok(html) => Ok(html),
            Err(e) => {
                tracing::warn!("Error loading page {}: {}", url, e);
                Ok(String::new())
            }
        }
    }

    async fn close(&mut self) {
        if let Some(mut driver) = self.driver.take() {
            tracing::debug!("Shutting down browser");
            if let Err(e) = tokio::task::spawn_blocking(move || driver.quit()).await {
                tracing::warn!("Browser shutdown task failed: {}", e);
            }
        }
    }
}

impl<D: BrowserDriver> Drop for RenderedFetcher<D> {
    fn drop(&mut self) {
        if let Some(mut driver) = self.driver.take() {
            driver.quit();
        }
    }
}

#[cfg(feature = "headless")]
pub use chrome::ChromeDriver;

#[cfg(feature = "headless")]
mod chrome {
    use super::{BrowserDriver, RenderError};
    use headless_chrome::{Browser, LaunchOptions, Tab};
    use std::sync::Arc;
    use std::time::Duration;

    /// [`BrowserDriver`] backed by a local Chrome/Chromium over CDP
    pub struct ChromeDriver {
        _browser: Browser,
        tab: Arc<Tab>,
    }

    impl ChromeDriver {
        /// Launches a headless browser and opens a single tab
        pub fn launch(user_agent: &str) -> Result<Self, RenderError> {
            tracing::info!("Setting up headless Chromium");

            let options = LaunchOptions::default_builder()
                .headless(true)
                .sandbox(false)
                .idle_browser_timeout(Duration::from_secs(300))
                .build()
                .map_err(|e| RenderError::Launch(e.to_string()))?;

            let browser = Browser::new(options).map_err(|e| RenderError::Launch(e.to_string()))?;
            let tab = browser
                .new_tab()
                .map_err(|e| RenderError::Launch(e.to_string()))?;
            tab.set_user_agent(user_agent, None, None)
                .map_err(|e| RenderError::Launch(e.to_string()))?;

            tracing::info!("Headless Chromium initialized");
            Ok(Self {
                _browser: browser,
                tab,
            })
        }
    }

    impl BrowserDriver for ChromeDriver {
        fn load(
            &mut self,
            url: &str,
            wait_for: &str,
            timeout: Duration,
        ) -> Result<String, RenderError> {
            self.tab
                .navigate_to(url)
                .map_err(|e| RenderError::Navigation(e.to_string()))?;

            self.tab
                .wait_for_element_with_custom_timeout(wait_for, timeout)
                .map_err(|_| RenderError::Timeout {
                    selector: wait_for.to_string(),
                    timeout,
                })?;

            self.tab
                .get_content()
                .map_err(|e| RenderError::Navigation(e.to_string()))
        }

        fn quit(&mut self) {
            if let Err(e) = self.tab.close(true) {
                tracing::debug!("Closing tab failed: {}", e);
            }
        }
    }
}
