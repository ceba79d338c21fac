//! Combined RSS 2.0 feed assembly and serialization.
//!
//! The aggregated items become one `<channel>` carrying the configured
//! output metadata and a `lastBuildDate` stamped at serialization time.
//! The destination file is overwritten on every run.

use crate::config::OutputConfig;
use crate::models::ReadingItem;
use chrono::Utc;
use rss::{Channel, ChannelBuilder};
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Assemble the aggregated items into an RSS 2.0 channel.
pub fn build_channel(items: &[ReadingItem], output: &OutputConfig) -> Channel {
    ChannelBuilder::default()
        .title(output.title.clone())
        .link(output.link.clone())
        .description(output.description.clone())
        .language(Some(output.language.clone()))
        .last_build_date(Some(Utc::now().to_rfc2822()))
        .items(
            items
                .iter()
                .map(ReadingItem::to_rss)
                .collect::<Vec<rss::Item>>(),
        )
        .build()
}

/// Serialize the combined feed and overwrite the destination file.
#[instrument(level = "info", skip_all, fields(path = %output.filename, count = items.len()))]
pub async fn write_feed(items: &[ReadingItem], output: &OutputConfig) -> Result<(), Box<dyn Error>> {
    let channel = build_channel(items, output);
    fs::write(&output.filename, channel.to_string()).await?;
    info!("Wrote combined feed");
    Ok(())
}
