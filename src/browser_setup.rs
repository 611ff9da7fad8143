//! Locating, downloading and launching Chrome
//!
//! Everything here is a setup step for `ChromeDocument`; the rest of the
//! crate only sees the page through `PageDocument`.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use futures::StreamExt;
use tokio::task::{self, JoinHandle};
use tracing::{debug, error, info, trace, warn};

use crate::utils::CHROME_USER_AGENT;

/// Chrome flags applied to every launch
const LAUNCH_ARGS: &[&str] = &[
    "--disable-blink-features=AutomationControlled",
    "--disable-infobars",
    "--disable-notifications",
    "--disable-extensions",
    "--disable-popup-blocking",
    "--disable-background-timer-throttling",
    "--disable-backgrounding-occluded-windows",
    "--disable-renderer-backgrounding",
    "--disable-breakpad",
    "--disable-hang-monitor",
    "--disable-features=TranslateUI",
    "--no-first-run",
    "--no-default-browser-check",
    "--no-sandbox",
    "--password-store=basic",
    "--use-mock-keychain",
    "--mute-audio",
];

/// A running browser and the task driving its DevTools connection
pub struct LaunchedBrowser {
    pub browser: Browser,
    pub handler: JoinHandle<()>,
    pub user_data_dir: PathBuf,
}

fn candidate_paths() -> Vec<PathBuf> {
    let fixed: &[&str] = if cfg!(target_os = "windows") {
        &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files\Chromium\Application\chrome.exe",
        ]
    } else if cfg!(target_os = "macos") {
        &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/opt/homebrew/bin/chromium",
        ]
    } else {
        &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
            "/usr/local/bin/chromium",
            "/opt/google/chrome/chrome",
        ]
    };

    let mut paths: Vec<PathBuf> = fixed.iter().map(PathBuf::from).collect();

    if cfg!(target_os = "windows") {
        if let Some(local) = dirs::data_local_dir() {
            paths.push(local.join(r"Google\Chrome\Application\chrome.exe"));
        }
    } else if cfg!(target_os = "macos")
        && let Some(home) = dirs::home_dir()
    {
        paths.push(home.join("Applications/Google Chrome.app/Contents/MacOS/Google Chrome"));
        paths.push(home.join("Applications/Chromium.app/Contents/MacOS/Chromium"));
    }

    paths
}

fn which(command: &str) -> Option<PathBuf> {
    let output = Command::new("which").arg(command).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let found = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!found.is_empty()).then(|| PathBuf::from(found))
}

/// Find a Chrome or Chromium executable on this machine
///
/// `CHROMIUM_PATH` wins when it points at an existing file. Then the usual
/// install locations for the platform are tried, then `which` on Unix.
///
/// # Errors
///
/// Returns an error when no executable is found.
pub async fn find_browser_executable() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("CHROMIUM_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Using browser from CHROMIUM_PATH: {}", path.display());
            return Ok(path);
        }
        warn!("CHROMIUM_PATH points to a missing file: {}", path.display());
    }

    if let Some(path) = candidate_paths().into_iter().find(|path| path.exists()) {
        info!("Found browser at: {}", path.display());
        return Ok(path);
    }

    if !cfg!(target_os = "windows") {
        for command in ["chromium", "chromium-browser", "google-chrome", "chrome"] {
            if let Some(path) = which(command) {
                info!("Found browser on PATH: {}", path.display());
                return Ok(path);
            }
        }
    }

    warn!("No Chrome/Chromium executable found");
    Err(anyhow::anyhow!("Chrome/Chromium executable not found"))
}

/// Directory that holds the downloaded Chromium
#[must_use]
pub fn managed_browser_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|cache| cache.join("jobhunter_scrape"))
        .unwrap_or_else(|| {
            let fallback = std::env::temp_dir().join("jobhunter_scrape_cache");
            warn!(
                "No user cache directory, using temp directory: {}",
                fallback.display()
            );
            fallback
        })
        .join("chromium")
}

/// Download a managed Chromium and return its executable
///
/// # Errors
///
/// Returns an error if the cache directory cannot be created or the download
/// fails.
pub async fn download_managed_browser() -> Result<PathBuf> {
    let cache_dir = managed_browser_dir();
    info!("Downloading managed Chromium into {}", cache_dir.display());
    tokio::fs::create_dir_all(&cache_dir)
        .await
        .context("Failed to create browser cache directory")?;

    let options = BrowserFetcherOptions::builder()
        .with_path(&cache_dir)
        .build()
        .context("Failed to build fetcher options")?;
    let revision = BrowserFetcher::new(options)
        .fetch()
        .await
        .context("Failed to fetch browser")?;

    info!("Downloaded Chromium to: {}", revision.folder_path.display());
    Ok(revision.executable_path)
}

/// CDP handler errors that come from events chromiumoxide cannot decode
///
/// Chrome emits protocol events newer than the bundled definitions; the
/// connection keeps working when these fail to deserialize.
#[must_use]
pub fn is_benign_handler_error(message: &str) -> bool {
    message.contains("data did not match any variant of untagged enum Message")
        || message.contains("Failed to deserialize WS response")
}

/// Find or download Chrome, launch it and start its handler task
///
/// Without `chrome_data_dir` the profile goes into a per-process directory
/// under the system temp dir.
///
/// # Errors
///
/// Returns an error if no browser can be found or downloaded, or Chrome
/// fails to start.
pub async fn launch_browser(
    headless: bool,
    chrome_data_dir: Option<PathBuf>,
) -> Result<LaunchedBrowser> {
    let executable = match find_browser_executable().await {
        Ok(path) => path,
        Err(_) => download_managed_browser().await?,
    };

    let user_data_dir = chrome_data_dir.unwrap_or_else(default_profile_dir);
    tokio::fs::create_dir_all(&user_data_dir)
        .await
        .context("Failed to create user data directory")?;

    let mut builder = BrowserConfigBuilder::default()
        .request_timeout(Duration::from_secs(30))
        .window_size(1920, 1080)
        .user_data_dir(&user_data_dir)
        .chrome_executable(&executable)
        .arg(format!("--user-agent={CHROME_USER_AGENT}"));
    builder = if headless {
        builder.headless_mode(HeadlessMode::default())
    } else {
        builder.with_head()
    };
    for arg in LAUNCH_ARGS {
        builder = builder.arg(*arg);
    }
    let config = builder
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))?;

    info!(
        "Launching {} browser {}",
        if headless { "headless" } else { "headful" },
        executable.display()
    );
    let (browser, mut handler) = Browser::launch(config)
        .await
        .context("Failed to launch browser")?;

    let handler = task::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                let message = e.to_string();
                if is_benign_handler_error(&message) {
                    trace!("Suppressed undecodable CDP event: {}", message);
                } else {
                    error!("Browser handler error: {:?}", e);
                }
            }
        }
        debug!("Browser handler task completed");
    });

    Ok(LaunchedBrowser {
        browser,
        handler,
        user_data_dir,
    })
}

fn default_profile_dir() -> PathBuf {
    std::env::temp_dir().join(format!("jobhunter_chrome_{}", std::process::id()))
}

/// Whether `dir` is a profile directory this crate created itself
#[must_use]
pub fn is_default_profile_dir(dir: &Path) -> bool {
    dir == default_profile_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benign_handler_errors() {
        assert!(is_benign_handler_error(
            "data did not match any variant of untagged enum Message"
        ));
        assert!(is_benign_handler_error(
            "Failed to deserialize WS response: unknown variant"
        ));
        assert!(!is_benign_handler_error("Connection reset by peer"));
    }

    #[test]
    fn test_managed_browser_dir_layout() {
        let dir = managed_browser_dir();
        assert!(dir.ends_with("jobhunter_scrape/chromium") || dir.ends_with("jobhunter_scrape_cache/chromium"));
    }

    #[test]
    fn test_default_profile_dir_is_per_process() {
        let dir = default_profile_dir();
        assert!(is_default_profile_dir(&dir));
        assert!(!is_default_profile_dir(Path::new("/tmp/someone_else")));
        assert!(
            dir.to_string_lossy()
                .ends_with(&std::process::id().to_string())
        );
    }
}
