//! One Chrome instance serving job pages
//!
//! Owns the browser, its handler task and its profile directory. The
//! handler is aborted when the session is dropped; the profile directory is
//! removed on `shutdown()` if the session created it.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chromiumoxide::browser::Browser;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use url::Url;

use crate::browser_setup::{LaunchedBrowser, is_default_profile_dir, launch_browser};
use crate::config::ScrapeConfig;
use crate::dom::ChromeDocument;

pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    temp_profile_dir: Option<PathBuf>,
}

impl BrowserSession {
    /// Launch Chrome as configured
    ///
    /// # Errors
    ///
    /// Returns an error if Chrome cannot be found, downloaded or started.
    pub async fn launch(config: &ScrapeConfig) -> Result<Self> {
        let launched = launch_browser(config.headless(), config.chrome_data_dir().cloned()).await?;
        Ok(Self::from_launched(launched))
    }

    #[must_use]
    pub fn from_launched(launched: LaunchedBrowser) -> Self {
        let LaunchedBrowser {
            browser,
            handler,
            user_data_dir,
        } = launched;
        let temp_profile_dir = is_default_profile_dir(&user_data_dir).then_some(user_data_dir);
        Self {
            browser,
            handler,
            temp_profile_dir,
        }
    }

    #[must_use]
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Open `url` in a new tab and wait for it to finish loading
    ///
    /// # Errors
    ///
    /// Returns an error if the tab cannot be created, navigation fails, or
    /// loading takes longer than `page_load_timeout`.
    pub async fn open(&self, url: &Url, page_load_timeout: Duration) -> Result<ChromeDocument> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("Failed to create page")?;

        info!("Navigating to {}", url);
        tokio::time::timeout(page_load_timeout, async {
            page.goto(url.as_str()).await?;
            page.wait_for_navigation().await?;
            Ok::<_, chromiumoxide::error::CdpError>(())
        })
        .await
        .with_context(|| format!("Timed out after {page_load_timeout:?} loading {url}"))?
        .with_context(|| format!("Failed to load {url}"))?;

        Ok(ChromeDocument::new(page))
    }

    /// Close the browser, wait for the process to exit and remove the
    /// temporary profile
    ///
    /// # Errors
    ///
    /// Never fails today; close and wait problems are logged.
    pub async fn shutdown(mut self) -> Result<()> {
        info!("Shutting down browser");
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
        if let Some(dir) = self.temp_profile_dir.take()
            && let Err(e) = tokio::fs::remove_dir_all(&dir).await
        {
            warn!(
                "Failed to remove profile directory {}: {}",
                dir.display(),
                e
            );
        }
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
        if let Some(dir) = self.temp_profile_dir.take() {
            warn!(
                "BrowserSession dropped without shutdown, leaving profile {}",
                dir.display()
            );
        }
    }
}
