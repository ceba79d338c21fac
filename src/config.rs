//! YAML configuration loading and validation.
//!
//! The entire run is driven by one YAML file: the output feed's metadata,
//! the recency window, and the ordered list of publications to aggregate.
//! The file is read exactly once at startup and the resulting [`Config`]
//! is passed by reference into every component that needs it. Any failure
//! here is fatal: a run with broken configuration writes nothing.
//!
//! # File shape
//!
//! ```yaml
//! days_old: 7
//! output:
//!   title: Curated Reads
//!   link: https://example.com/reading.xml
//!   description: Article recommendations from curated-reading newsletters.
//!   language: en-us
//!   filename: reading.xml
//! publications:
//!   - name: Longreads
//!     url: https://longreads.com/feed/
//!     date_term: published
//!     search:
//!       value: "Read more"
//!   - name: The Browser
//!     url: https://thebrowser.com/rss/
//!     date_term: published
//! ```

use serde::Deserialize;
use std::error::Error;
use std::fs;
use tracing::{debug, instrument};
use url::Url;

/// Top-level run configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Recency window: only entries published within the last `days_old`
    /// days are considered.
    pub days_old: i64,
    /// Metadata and destination of the combined output feed.
    pub output: OutputConfig,
    /// Publications to aggregate, in the order their items should appear.
    pub publications: Vec<PublicationSpec>,
}

/// Metadata for the combined output feed.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Channel title.
    pub title: String,
    /// Channel link.
    pub link: String,
    /// Channel description.
    pub description: String,
    /// Channel language code (e.g. `en-us`).
    pub language: String,
    /// Destination file, overwritten on every run.
    pub filename: String,
}

/// One publication to aggregate.
#[derive(Debug, Clone, Deserialize)]
pub struct PublicationSpec {
    /// Display name; also the key that selects the extraction strategy.
    pub name: String,
    /// Feed URL.
    pub url: String,
    /// Name of the entry date field to filter on (`published` or `updated`).
    pub date_term: String,
    /// Marker for extraction strategies that locate a link by its visible
    /// text. Publications without a `search` block and without a dedicated
    /// strategy have their entries wrapped directly.
    #[serde(default)]
    pub search: Option<SearchSpec>,
}

/// The text marker used by search-based extraction.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSpec {
    /// Exact visible text of the anchor that carries the article link.
    pub value: String,
}

/// Read and validate the configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid YAML for the
/// expected shape, or names a publication with an unparsable feed URL.
#[instrument(level = "info", skip_all, fields(%path))]
pub fn load_config(path: &str) -> Result<Config, Box<dyn Error>> {
    let raw = fs::read_to_string(path)?;
    let config: Config = serde_yaml::from_str(&raw)?;

    for publication in &config.publications {
        Url::parse(&publication.url)
            .map_err(|e| format!("invalid feed URL for {}: {e}", publication.name))?;
    }

    debug!(publications = config.publications.len(), days_old = config.days_old, "Parsed configuration");
    Ok(config)
}
