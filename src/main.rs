//! Site-Harvester main entry point
//!
//! This is the command-line interface for the Site-Harvester service.

use clap::Parser;
use site_harvester::config::{load_config_with_hash, Config};
use site_harvester::crawler::{crawl, CrawlParams};
use site_harvester::renderer::HttpRenderer;
use site_harvester::sink::FsRecordSink;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Harvester: a bounded-depth site text harvester
///
/// Site-Harvester crawls a website from a seed URL, extracts text from the
/// requested HTML tags on every same-origin page up to a depth limit, and
/// packages the results into one downloadable zip archive. Without --url it
/// runs as an HTTP service and crawls on demand.
#[derive(Parser, Debug)]
#[command(name = "site-harvester")]
#[command(version = "1.0.0")]
#[command(about = "A bounded-depth site text harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Run one crawl from this seed URL and exit instead of serving
    #[arg(long)]
    url: Option<String>,

    /// Maximum traversal depth for a one-shot crawl (seed is depth 1)
    #[arg(long, default_value_t = 2, requires = "url")]
    max_depth: u32,

    /// Tag selector to extract text from; repeatable
    #[arg(long = "tag", value_name = "TAG", requires = "url")]
    tags: Vec<String>,

    /// URL prefix to exclude from the crawl; repeatable
    #[arg(long = "blacklist", value_name = "PREFIX", requires = "url")]
    blacklist: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    match cli.url {
        Some(url) => handle_one_shot(config, url, cli.max_depth, cli.tags, cli.blacklist).await,
        None => handle_serve(config).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_harvester=info,warn"),
            1 => EnvFilter::new("site_harvester=debug,info"),
            2 => EnvFilter::new("site_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles service mode: serves the trigger API until shutdown
async fn handle_serve(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting in service mode");

    match site_harvester::api::serve(config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Server failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles a one-shot crawl from the command line
async fn handle_one_shot(
    config: Config,
    url: String,
    max_depth: u32,
    tags: Vec<String>,
    blacklist: Vec<String>,
) -> anyhow::Result<()> {
    let params = CrawlParams {
        seed_url: url,
        max_depth,
        blacklist,
        tags: if tags.is_empty() {
            vec!["p".to_string()]
        } else {
            tags
        },
    };

    tracing::info!(
        "Starting one-shot crawl of {} (max depth {})",
        params.seed_url,
        params.max_depth
    );

    let renderer = HttpRenderer::new(&config.renderer)?;
    let mut sink = FsRecordSink::new(&config.output.directory_path)?;

    match crawl(renderer, &params, &mut sink).await {
        Ok(stats) => {
            let archive = sink.write_archive(&config.output.archive_name)?;
            println!("Crawl completed successfully");
            println!("  Pages rendered: {}", stats.pages_rendered);
            println!("  Pages archived: {}", stats.pages_emitted);
            println!("  Pages without content: {}", stats.pages_empty);
            println!("  Pages failed: {}", stats.pages_failed);
            println!("  Archive: {}", archive.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
