//! Skein: a same-origin web crawler
//!
//! This crate implements a concurrent crawler that starts from a single
//! address, fetches pages, reports each page's assets (images, scripts,
//! stylesheets) to a caller-supplied sink, and recursively follows unseen
//! same-host links until the whole reachable tree has been visited.

pub mod crawler;
pub mod url;

use thiserror::Error;

/// Main error type for Skein operations
#[derive(Debug, Error)]
pub enum SkeinError {
    #[error("HTTP error for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Result type alias for Skein operations
pub type Result<T> = std::result::Result<T, SkeinError>;

// Re-export commonly used types
pub use crate::crawler::{crawl, CrawlResult, ParsedPage, VisitLedger};
pub use crate::url::{normalize_uri, same_host};
