//! The Sunday Long Read extraction: one recommendation per `<h1>`.
//!
//! Unlike The Browser, this newsletter opens each heading with a byline
//! node; the article anchor is the heading's *second* child. That
//! first-versus-second-child difference is exactly how the two sites'
//! markup differs.

use super::{ExtractedLink, node_text};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::info;

static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());

/// Pull one link from every `<h1>` whose second child is an anchor.
///
/// Headings with fewer than two children, a plain-text second child, or
/// a second child with no `href` are logged and skipped. Links come back
/// in document order.
pub fn extract_links(document: &Html) -> Vec<ExtractedLink> {
    let mut links = Vec::new();

    for heading in document.select(&HEADING) {
        let mut children = heading.children();
        let first = children.next();
        let Some(second) = children.next() else {
            let text = first.map(node_text).unwrap_or_default();
            info!(%text, "Heading has fewer than two children; skipping");
            continue;
        };

        match ElementRef::wrap(second) {
            Some(anchor) => match anchor.value().attr("href") {
                Some(href) => links.push(ExtractedLink {
                    title: anchor.text().collect(),
                    href: href.to_string(),
                }),
                None => {
                    info!(text = %anchor.text().collect::<String>(), "Heading link has no href; skipping");
                }
            },
            None => {
                info!(text = %node_text(second), "Second heading node is not a link; skipping");
            }
        }
    }

    links
}
