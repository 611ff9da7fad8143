//! jobhunter-scrape: extract one job posting from a page and print it as JSON
//!
//! Logs go to stderr; stdout carries exactly one `ScrapedRecord` document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use jobhunter_scrape::browser_session::BrowserSession;
use jobhunter_scrape::config::{ScrapeConfig, ScrapeConfigBuilder};
use jobhunter_scrape::dom::{HtmlSnapshot, PageDocument};
use jobhunter_scrape::extraction::{JobExtractor, ScrapedRecord};
use jobhunter_scrape::messaging::ScrapeListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "jobhunter-scrape",
    about = "Wait for a job page to render and extract the posting as JSON",
    version
)]
struct Cli {
    /// JSON config file; fields it leaves out keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the readiness timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Pretty-print the JSON record
    #[arg(long)]
    pretty: bool,
    #[command(flatten)]
    source: Source,
    /// Show the browser window (only with --url)
    #[arg(long, requires = "url")]
    headful: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Source {
    /// Read the page from a saved HTML file
    #[arg(long)]
    html: Option<PathBuf>,
    /// Load the page in Chrome
    #[arg(long)]
    url: Option<Url>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> Result<ScrapeConfig> {
    let base = match &cli.config {
        Some(path) => ScrapeConfig::from_json_file(path)?,
        None => ScrapeConfig::default(),
    };
    let mut builder = ScrapeConfigBuilder::from(base);
    if let Some(timeout_ms) = cli.timeout_ms {
        builder = builder.readiness_timeout_ms(timeout_ms);
    }
    if cli.headful {
        builder = builder.headless(false);
    }
    Ok(builder.build()?)
}

/// Run one `SCRAPE_DATA` round trip against `document`
async fn scrape<D: PageDocument + 'static>(
    document: D,
    extractor: JobExtractor,
) -> Result<ScrapedRecord> {
    let (client, listener) = ScrapeListener::spawn(document, extractor);
    let record = client.scrape().await?;
    drop(client);
    listener.await.context("Scrape listener task failed")?;
    Ok(record)
}

async fn scrape_url(
    url: &Url,
    config: &ScrapeConfig,
    extractor: JobExtractor,
) -> Result<ScrapedRecord> {
    let session = BrowserSession::launch(config).await?;
    let record = match session.open(url, config.page_load_timeout()).await {
        Ok(document) => scrape(document, extractor).await,
        Err(e) => Err(e),
    };
    session.shutdown().await?;
    record
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let extractor = JobExtractor::from_config(&config)?;

    let record = if let Some(path) = &cli.source.html {
        info!("Reading page from {}", path.display());
        let html = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        scrape(HtmlSnapshot::new(html), extractor).await?
    } else if let Some(url) = &cli.source.url {
        scrape_url(url, &config, extractor).await?
    } else {
        anyhow::bail!("Either --html or --url is required");
    };

    let json = if cli.pretty {
        serde_json::to_string_pretty(&record)?
    } else {
        serde_json::to_string(&record)?
    };
    println!("{json}");
    Ok(())
}
