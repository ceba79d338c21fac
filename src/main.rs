//! # Longform Reads
//!
//! Aggregates a curated set of reading-recommendation newsletters
//! (RSS/Atom) into one combined RSS feed.
//!
//! ## Pipeline
//!
//! 1. **Configure**: read the YAML config (output metadata, recency
//!    window, publication list)
//! 2. **Fetch**: download and parse each publication's feed
//! 3. **Filter**: keep entries published inside the recency window
//! 4. **Extract**: pull article links out of entry HTML with
//!    per-publication rules
//! 5. **Resolve**: strip tracking queries and follow redirects to each
//!    article's canonical URL
//! 6. **Write**: serialize everything into a single RSS 2.0 document
//!
//! ## Usage
//!
//! ```sh
//! longform_reads --config config.yml
//! ```

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod extract;
mod feeds;
mod models;
mod output;
mod pipeline;
mod resolver;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("longform_reads starting up");

    let args = Cli::parse();
    debug!(?args.config, "Parsed CLI arguments");

    let config_path = args.config.as_deref().unwrap_or("config.yml");
    let config = match config::load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            error!(path = %config_path, error = %e, "Failed to load configuration");
            return Err(e);
        }
    };
    info!(
        path = %config_path,
        publications = config.publications.len(),
        days_old = config.days_old,
        "Loaded configuration"
    );

    let client = resolver::http_client()?;

    let items = pipeline::aggregate(&config, &client).await?;

    info!(
        count = items.len(),
        path = %config.output.filename,
        "Writing total items to the combined feed"
    );
    output::write_feed(&items, &config.output).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
