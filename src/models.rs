//! Data model for the normalized output items.
//!
//! Everything upstream of the output file (feed entries, parsed HTML,
//! redirect chains) funnels into [`ReadingItem`], the one unit the
//! combined feed is built from.

use chrono::{DateTime, Utc};

/// One normalized, link-resolved article recommendation.
///
/// An item is only ever constructed with a resolved link: extraction
/// strategies that cannot find a link omit the item entirely rather than
/// produce one without.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingItem {
    /// The article headline.
    pub title: String,
    /// Canonical article URL: query-stripped and redirect-resolved.
    pub link: String,
    /// Display name of the publication that recommended the article.
    pub description: String,
    /// Publish date of the recommending entry.
    pub pub_date: DateTime<Utc>,
}

impl ReadingItem {
    /// Convert into an RSS `<item>` element.
    pub fn to_rss(&self) -> rss::Item {
        rss::ItemBuilder::default()
            .title(Some(self.title.clone()))
            .link(Some(self.link.clone()))
            .description(Some(self.description.clone()))
            .pub_date(Some(self.pub_date.to_rfc2822()))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_to_rss_maps_all_fields() {
        let item = ReadingItem {
            title: "A Long Story".to_string(),
            link: "https://example.com/a-long-story".to_string(),
            description: "The Browser".to_string(),
            pub_date: Utc.with_ymd_and_hms(2025, 5, 6, 12, 0, 0).unwrap(),
        };

        let rss_item = item.to_rss();
        assert_eq!(rss_item.title(), Some("A Long Story"));
        assert_eq!(rss_item.link(), Some("https://example.com/a-long-story"));
        assert_eq!(rss_item.description(), Some("The Browser"));
        assert_eq!(rss_item.pub_date(), Some(item.pub_date.to_rfc2822().as_str()));
    }
}
