//! End-to-end aggregation across publications.
//!
//! One pass, strictly sequential: fetch a publication's feed, narrow it
//! to the recency window, extract and resolve its links, append, move to
//! the next publication. Items land in publication-config order and, per
//! publication, in emission order; no cross-publication sorting or
//! deduplication happens.

use crate::config::Config;
use crate::extract;
use crate::feeds;
use crate::models::ReadingItem;
use std::error::Error;
use tracing::{error, info, instrument};

/// Aggregate items from every configured publication.
///
/// A publication whose feed cannot be fetched or parsed contributes
/// nothing: the failure is logged and the run continues with the next
/// publication. Date-field and missing-content failures abort the run.
#[instrument(level = "info", skip_all)]
pub async fn aggregate(
    config: &Config,
    client: &reqwest::Client,
) -> Result<Vec<ReadingItem>, Box<dyn Error>> {
    let mut items = Vec::new();

    for publication in &config.publications {
        info!(publication = %publication.name, url = %publication.url, "Getting publication feed");

        let feed = match feeds::fetch_feed(client, &publication.url).await {
            Ok(feed) => feed,
            Err(e) => {
                error!(publication = %publication.name, error = %e, "Skipping publication");
                continue;
            }
        };

        info!(days_old = config.days_old, "Filtering out older entries");
        let entries = feeds::filter_recent(&feed, &publication.date_term, config.days_old)?;

        let extracted = extract::extract(client, publication, &entries).await?;
        items.extend(extracted);
    }

    Ok(items)
}
