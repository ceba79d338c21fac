//! Longreads extraction: one marked anchor per entry.
//!
//! Longreads entries are essays about a single recommended article, with
//! the article link hiding behind a fixed call-to-action string. The
//! strategy finds the anchor whose visible text equals the configured
//! marker and pairs its `href` with the entry's own title.

use super::ExtractedLink;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::info;

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// Find the first anchor whose visible text exactly equals `marker`.
///
/// Yields at most one link. Entries with no matching anchor (or a match
/// without an `href`) are logged and skipped, as are entries of a
/// publication configured without a marker.
pub fn extract_links(
    document: &Html,
    marker: Option<&str>,
    entry_title: &str,
) -> Vec<ExtractedLink> {
    let Some(marker) = marker else {
        info!(title = %entry_title, "No search marker configured; skipping entry");
        return Vec::new();
    };

    let anchor = document
        .select(&ANCHOR)
        .find(|a| a.text().collect::<String>() == marker);

    match anchor.and_then(|a| a.value().attr("href")) {
        Some(href) => vec![ExtractedLink {
            title: entry_title.to_string(),
            href: href.to_string(),
        }],
        None => {
            info!(title = %entry_title, "No anchor matching the search marker; skipping entry");
            Vec::new()
        }
    }
}
