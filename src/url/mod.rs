//! URL handling module for Skein
//!
//! This module provides the normalization policy that gives crawled
//! addresses their dedup identity, plus the same-host predicate used by the
//! same-origin link filter.

mod normalize;

pub use normalize::{normalize_uri, same_host};
