//! Canonical link resolution through HTTP redirects.
//!
//! Links lifted out of newsletter HTML are rarely the article itself:
//! they carry tracking query strings and bounce through one or more
//! redirect hops first. [`resolve`] strips the query string, follows the
//! redirect chain to its final destination, and strips the query string
//! again from wherever the chain lands.
//!
//! # Retry Strategy
//!
//! A transient network failure should not sink a whole aggregation run
//! over one link. The GET is retried up to 3 times with exponential
//! backoff (500 ms base, capped at 5 s) plus 0-250 ms of random jitter;
//! when every attempt fails the resolver keeps the raw query-stripped
//! link and logs a warning.

use rand::{Rng, rng};
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

const MAX_RETRIES: usize = 3;
const BASE_DELAY: Duration = Duration::from_millis(500);
const MAX_DELAY: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the shared HTTP client used for feed fetches and link resolution.
///
/// Redirect following is left at reqwest's default policy; every request
/// carries a 30-second timeout and a `name/version` user agent.
pub fn http_client() -> Result<reqwest::Client, Box<dyn Error>> {
    let client = reqwest::Client::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}

/// Truncate a URL at its first `?`.
///
/// This is string-level removal of the query portion, not URL parsing:
/// the piece before the first `?` is returned unchanged.
pub fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Resolve a raw article link to its canonical destination.
///
/// The query string is stripped *before* any network call, redirects are
/// followed, and the final URL is stripped again. When a redirect
/// occurred the final URL is logged. On persistent network failure the
/// raw stripped link is returned instead of an error.
#[instrument(level = "info", skip_all, fields(url = %raw_link))]
pub async fn resolve(client: &reqwest::Client, raw_link: &str) -> String {
    let stripped = strip_query(raw_link);
    info!(url = %stripped, "Checking URL for redirects");

    match get_with_backoff(client, stripped).await {
        Ok(final_url) => {
            let canonical = strip_query(&final_url);
            if final_url != stripped {
                info!(url = %canonical, "Found final URL");
            }
            canonical.to_string()
        }
        Err(e) => {
            warn!(url = %stripped, error = %e, "Link resolution failed; keeping raw link");
            stripped.to_string()
        }
    }
}

/// GET a URL with redirect following and exponential backoff.
///
/// Returns the final URL after redirects. HTTP error statuses are not
/// treated as failures here: a page that answers 404 still answered, and
/// its URL is still the canonical destination.
async fn get_with_backoff(client: &reqwest::Client, url: &str) -> Result<String, reqwest::Error> {
    let mut attempt = 0usize;

    loop {
        match client.get(url).send().await {
            Ok(response) => return Ok(response.url().as_str().to_string()),
            Err(e) => {
                attempt += 1;
                if attempt > MAX_RETRIES {
                    return Err(e);
                }

                // backoff calc
                let mut delay = BASE_DELAY.saturating_mul(1 << (attempt - 1));
                if delay > MAX_DELAY {
                    delay = MAX_DELAY;
                }
                let jitter_ms: u64 = rng().random_range(0..=250);
                let delay = delay + Duration::from_millis(jitter_ms);

                warn!(
                    attempt,
                    max = MAX_RETRIES,
                    ?delay,
                    error = %e,
                    "GET failed; backing off"
                );
                sleep(delay).await;
            }
        }
    }
}
