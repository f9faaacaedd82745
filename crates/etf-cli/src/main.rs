use anyhow::{Context, Result};
use clap::Parser;
use etf_acquire::fetch::HttpFetcher;
use etf_acquire::{output, trackingdifferences};

#[derive(Parser)]
#[command(name = "etf-scraper")]
#[command(about = "Scrape ETF key facts from trackingdifferences.com and print them as JSON")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long)]
    utc: bool,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let isins = trackingdifferences::ISINS;
    etf_validate::check_all(isins);

    let fetcher = HttpFetcher::new(trackingdifferences::ALLOWED_DOMAINS)
        .context("Failed to build HTTP client")?;

    let infos = trackingdifferences::scrape_all(&fetcher, isins).await;
    let empty = infos.iter().filter(|i| i.is_empty()).count();
    tracing::info!(records = infos.len(), empty, "Finished scraping");

    let stdout = std::io::stdout().lock();
    output::write_json(stdout, &infos).context("Failed to write JSON to stdout")?;

    Ok(())
}

/// Logs go to stderr so stdout carries only the JSON document.
fn init_logging(cli: &Cli) {
    // Keep the HTML-parsing crates quiet at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }
}
