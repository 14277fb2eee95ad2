//! HTTP fetcher implementation
//!
//! This module is the crawler's gateway to the network:
//! - Building the HTTP client shared by a whole crawl run
//! - GET requests for page content
//! - Distinguishing non-success statuses from transport failures

use crate::SkeinError;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Outcome of fetching one address
#[derive(Debug)]
pub enum FetchOutcome {
    /// The server answered 200 with this body
    Page {
        /// Page body content
        body: String,
    },

    /// The server answered with a non-200 status; the branch ends here
    /// without a result, and the address stays claimed so no other branch
    /// retries it
    Skipped {
        /// The HTTP status code received
        status: u16,
    },
}

/// Builds the HTTP client used for an entire crawl invocation
///
/// The client is constructed once per crawl and shared across every
/// concurrent branch; connection reuse is its internal concern. Redirects
/// are not followed, so a 3xx answer surfaces as a skipped status rather
/// than a transparent hop to another address.
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one address
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `address` - The normalized address to fetch
///
/// # Returns
///
/// * `Ok(FetchOutcome::Page)` - status 200, body included
/// * `Ok(FetchOutcome::Skipped)` - any other status
/// * `Err(SkeinError)` - transport failure (connection refused, timeout,
///   DNS failure) or failure while reading the body
pub async fn fetch_url(client: &Client, address: &Url) -> Result<FetchOutcome, SkeinError> {
    let response = client
        .get(address.clone())
        .send()
        .await
        .map_err(|source| SkeinError::Http {
            url: address.to_string(),
            source,
        })?;

    let status = response.status();
    if status != StatusCode::OK {
        return Ok(FetchOutcome::Skipped {
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| SkeinError::Body {
        url: address.to_string(),
        source,
    })?;

    Ok(FetchOutcome::Page { body })
}
