//! The Browser extraction: one recommendation per `<h3>` heading.
//!
//! The Browser's digest entries title each recommendation with an `<h3>`
//! whose *first* child is the article anchor. Headings that open with
//! plain text are section dividers and carry no link.

use super::{ExtractedLink, node_text};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::info;

static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").unwrap());

/// Pull one link from every `<h3>` whose first child is an anchor.
///
/// Headings whose first child is plain text (or missing, or an element
/// with no `href`) are logged and skipped. Links come back in document
/// order.
pub fn extract_links(document: &Html) -> Vec<ExtractedLink> {
    let mut links = Vec::new();

    for heading in document.select(&HEADING) {
        let Some(first) = heading.first_child() else {
            info!(text = %heading.text().collect::<String>(), "Heading has no children; skipping");
            continue;
        };

        match ElementRef::wrap(first) {
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
                info!(text = %node_text(first), "Heading does not start with a link; skipping");
            }
        }
    }

    links
}
