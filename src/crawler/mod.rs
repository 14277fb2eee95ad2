//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching over a shared connection pool
//! - HTML parsing and asset/link extraction
//! - The visit ledger that prevents duplicate fetches
//! - Recursive branch spawning and completion collection

mod collector;
mod fetcher;
mod ledger;
mod orchestrator;
mod parser;

pub use collector::{settle, TaskNode};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome};
pub use ledger::VisitLedger;
pub use orchestrator::{crawl, CrawlResult};
pub use parser::{analyze_page, ParsedPage};
