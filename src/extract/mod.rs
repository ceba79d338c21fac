//! Per-publication extraction of article links from entry HTML.
//!
//! Curated-reading newsletters embed their recommendations in the HTML
//! body of each feed entry, and every publication marks its links up
//! differently. This module selects a [`Strategy`] per publication and
//! turns recent entries into normalized, link-resolved [`ReadingItem`]s.
//!
//! # Strategies
//!
//! | Publication | Module | Rule |
//! |-------------|--------|------|
//! | Longreads | [`longreads`] | Anchor matched by its visible text |
//! | The Browser | [`the_browser`] | Anchor as first child of each `<h3>` |
//! | The Sunday Long Read | [`sunday_long_read`] | Anchor as second child of each `<h1>` |
//! | anything else, no search marker | (none) | Entries wrapped directly, no HTML parsing |
//! | anything else, marker present | (none) | Entries skipped with a warning |
//!
//! Every extracted link, including the direct-wrap path, goes through
//! [`build_item`], so query stripping and redirect resolution are applied
//! uniformly regardless of source.

pub mod longreads;
pub mod sunday_long_read;
pub mod the_browser;

use crate::config::PublicationSpec;
use crate::feeds::{entry_date, entry_title};
use crate::models::ReadingItem;
use crate::resolver;
use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node};
use std::error::Error;
use tracing::{info, instrument, warn};

/// An article link pulled out of an entry's HTML, prior to resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedLink {
    /// The article headline.
    pub title: String,
    /// The raw `href` as it appears in the entry HTML.
    pub href: String,
}

/// How a publication's entries are turned into items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One marked anchor per entry, matched by its visible text.
    Longreads,
    /// One anchor per `<h3>`, as the heading's first child.
    TheBrowser,
    /// One anchor per `<h1>`, as the heading's second child.
    SundayLongRead,
    /// No extraction: each entry is wrapped directly as an item.
    PassThrough,
    /// Extraction was requested but no strategy exists for the name.
    Unsupported,
}

impl Strategy {
    /// Select the strategy for a publication.
    ///
    /// The three dedicated strategies are keyed by exact publication
    /// name. Any other name falls back to [`Strategy::PassThrough`] when
    /// no search marker was configured, and to
    /// [`Strategy::Unsupported`] when one was.
    pub fn for_publication(name: &str, wants_extraction: bool) -> Strategy {
        match name {
            "Longreads" => Strategy::Longreads,
            "The Browser" => Strategy::TheBrowser,
            "The Sunday Long Read" => Strategy::SundayLongRead,
            _ if !wants_extraction => Strategy::PassThrough,
            _ => Strategy::Unsupported,
        }
    }
}

/// Extract normalized items from a publication's recent entries.
///
/// Entries are processed in feed order; each entry yields zero or more
/// items depending on the strategy. Date-field and missing-content
/// failures propagate; a missing extraction target within an entry is
/// logged and skipped.
#[instrument(level = "info", skip_all, fields(publication = %publication.name, entries = entries.len()))]
pub async fn extract(
    client: &reqwest::Client,
    publication: &PublicationSpec,
    entries: &[Entry],
) -> Result<Vec<ReadingItem>, Box<dyn Error>> {
    let strategy = Strategy::for_publication(&publication.name, publication.search.is_some());
    let marker = publication.search.as_ref().map(|s| s.value.as_str());

    let mut items = Vec::new();

    for entry in entries {
        let pub_date = entry_date(entry, &publication.date_term)?;

        match strategy {
            Strategy::Unsupported => {
                warn!(
                    title = %entry_title(entry),
                    "No extraction strategy for publication; skipping entry"
                );
            }
            Strategy::PassThrough => {
                let Some(link) = entry.links.first() else {
                    info!(title = %entry_title(entry), "Entry has no link; skipping");
                    continue;
                };
                let item = build_item(
                    client,
                    entry_title(entry).to_string(),
                    &link.href,
                    &publication.name,
                    pub_date,
                )
                .await;
                items.push(item);
            }
            Strategy::Longreads | Strategy::TheBrowser | Strategy::SundayLongRead => {
                // Parsing finishes before any resolution starts; the
                // document never lives across an await.
                let links = {
                    let document = Html::parse_fragment(entry_content(entry)?);
                    match strategy {
                        Strategy::Longreads => {
                            longreads::extract_links(&document, marker, entry_title(entry))
                        }
                        Strategy::TheBrowser => the_browser::extract_links(&document),
                        Strategy::SundayLongRead => sunday_long_read::extract_links(&document),
                        _ => Vec::new(),
                    }
                };

                for link in links {
                    let item =
                        build_item(client, link.title, &link.href, &publication.name, pub_date)
                            .await;
                    items.push(item);
                }
            }
        }
    }

    info!(count = items.len(), publication = %publication.name, "Extracted items");
    Ok(items)
}

/// Build a normalized item, resolving the raw link first.
///
/// Every strategy and the direct-wrap path funnel through here, so an
/// item never carries an unresolved link.
pub async fn build_item(
    client: &reqwest::Client,
    title: String,
    raw_link: &str,
    publication: &str,
    pub_date: DateTime<Utc>,
) -> ReadingItem {
    let link = resolver::resolve(client, raw_link).await;
    ReadingItem {
        title,
        link,
        description: publication.to_string(),
        pub_date,
    }
}

/// The entry's HTML content body.
fn entry_content(entry: &Entry) -> Result<&str, Box<dyn Error>> {
    entry
        .content
        .as_ref()
        .and_then(|c| c.body.as_deref())
        .ok_or_else(|| format!("entry `{}` has no HTML content", entry_title(entry)).into())
}

/// Visible text of a single DOM node, whether element or text.
pub(crate) fn node_text(node: NodeRef<'_, Node>) -> String {
    match ElementRef::wrap(node) {
        Some(element) => element.text().collect(),
        None => node
            .value()
            .as_text()
            .map(|t| t.to_string())
            .unwrap_or_default(),
    }
}
