//! Feed retrieval and recency filtering.
//!
//! A publication's feed is fetched over HTTP and parsed with `feed-rs`;
//! its entries are then narrowed to the recency window before any HTML
//! extraction happens. A feed whose metadata lacks a title is treated as
//! invalid, the same way an unreachable or unparsable feed is.

use chrono::{DateTime, Duration, Utc};
use feed_rs::model::{Entry, Feed};
use feed_rs::parser;
use std::error::Error;
use tracing::{debug, instrument};

/// Fetch and parse a publication's feed.
///
/// # Errors
///
/// Returns an error for network failures, non-success HTTP statuses,
/// unparsable feed documents, and feeds with no title metadata
/// ("Feed not valid"). Callers decide whether that ends the run; the
/// aggregation loop skips the publication and moves on.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_feed(client: &reqwest::Client, url: &str) -> Result<Feed, Box<dyn Error>> {
    let bytes = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    let feed = parser::parse(&bytes[..])?;
    if feed.title.is_none() {
        return Err(format!("Feed not valid: {url}").into());
    }

    debug!(entries = feed.entries.len(), "Parsed feed");
    Ok(feed)
}

/// Retain the entries published within the last `days_old` days.
///
/// The cutoff is strict: an entry dated exactly `days_old` days ago is
/// excluded. Source order is preserved. An empty result is not an error;
/// an entry whose date field is missing or unknown is.
#[instrument(level = "info", skip_all, fields(%date_term, days_old))]
pub fn filter_recent(
    feed: &Feed,
    date_term: &str,
    days_old: i64,
) -> Result<Vec<Entry>, Box<dyn Error>> {
    let since = Utc::now() - Duration::days(days_old);
    filter_since(&feed.entries, date_term, since)
}

fn filter_since(
    entries: &[Entry],
    date_term: &str,
    since: DateTime<Utc>,
) -> Result<Vec<Entry>, Box<dyn Error>> {
    let mut recent = Vec::new();

    for entry in entries {
        let published = entry_date(entry, date_term)?;
        if published > since {
            recent.push(entry.clone());
        }
    }

    debug!(total = entries.len(), recent = recent.len(), "Filtered entries");
    Ok(recent)
}

/// Read the entry date field named by `date_term`.
///
/// Feeds expose two date fields: `published` and `updated`. Anything else
/// in the configuration is a hard error, as is an entry that lacks the
/// named field.
pub fn entry_date(entry: &Entry, date_term: &str) -> Result<DateTime<Utc>, Box<dyn Error>> {
    let date = match date_term {
        "published" => entry.published,
        "updated" => entry.updated,
        other => return Err(format!("unknown date field `{other}`").into()),
    };

    date.ok_or_else(|| {
        format!(
            "entry `{}` is missing its `{date_term}` date",
            entry_title(entry)
        )
        .into()
    })
}

/// The entry's title, or an empty string when the feed omits one.
pub fn entry_title(entry: &Entry) -> &str {
    entry
        .title
        .as_ref()
        .map(|t| t.content.as_str())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parse(xml: &str) -> Feed {
        parser::parse(xml.as_bytes()).unwrap()
    }

    fn rss_feed(items: &str) -> Feed {
        parse(&format!(
            r#"<rss version="2.0"><channel>
                 <title>Fixture</title>
                 <link>https://fixture.example/</link>
                 <description>fixture</description>
                 {items}
               </channel></rss>"#
        ))
    }

    #[test]
    fn test_filter_since_is_strict() {
        let feed = rss_feed(
            r#"<item><title>older</title><pubDate>Sun, 01 Jun 2025 12:00:00 GMT</pubDate></item>
               <item><title>boundary</title><pubDate>Tue, 03 Jun 2025 12:00:00 GMT</pubDate></item>
               <item><title>newer</title><pubDate>Thu, 05 Jun 2025 12:00:00 GMT</pubDate></item>"#,
        );
        let since = Utc.with_ymd_and_hms(2025, 6, 3, 12, 0, 0).unwrap();

        let recent = filter_since(&feed.entries, "published", since).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(entry_title(&recent[0]), "newer");
    }

    #[test]
    fn test_filter_since_preserves_order() {
        let feed = rss_feed(
            r#"<item><title>first</title><pubDate>Thu, 05 Jun 2025 09:00:00 GMT</pubDate></item>
               <item><title>second</title><pubDate>Thu, 05 Jun 2025 08:00:00 GMT</pubDate></item>"#,
        );
        let since = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();

        let recent = filter_since(&feed.entries, "published", since).unwrap();
        let titles: Vec<_> = recent.iter().map(entry_title).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn test_filter_since_empty_result_is_ok() {
        let feed = rss_feed(
            r#"<item><title>ancient</title><pubDate>Mon, 01 Jan 2001 00:00:00 GMT</pubDate></item>"#,
        );
        let since = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();

        let recent = filter_since(&feed.entries, "published", since).unwrap();
        assert!(recent.is_empty());
    }

    #[test]
    fn test_unknown_date_term_is_an_error() {
        let feed = rss_feed(
            r#"<item><title>e</title><pubDate>Thu, 05 Jun 2025 09:00:00 GMT</pubDate></item>"#,
        );
        let since = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();

        let result = filter_since(&feed.entries, "created", since);
        assert!(result.unwrap_err().to_string().contains("created"));
    }

    #[test]
    fn test_missing_date_is_an_error() {
        let feed = rss_feed(r#"<item><title>undated</title></item>"#);
        let since = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();

        let result = filter_since(&feed.entries, "published", since);
        assert!(result.unwrap_err().to_string().contains("undated"));
    }

    #[test]
    fn test_updated_date_term_reads_atom_updated() {
        let feed = parse(
            r#"<feed xmlns="http://www.w3.org/2005/Atom">
                 <title>Fixture</title>
                 <entry>
                   <title>e</title>
                   <updated>2025-06-05T10:00:00Z</updated>
                 </entry>
               </feed>"#,
        );

        let date = entry_date(&feed.entries[0], "updated").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2025, 6, 5, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_entry_title_default() {
        let feed = rss_feed(r#"<item><link>https://x.example/</link></item>"#);
        assert_eq!(entry_title(&feed.entries[0]), "");
    }
}
