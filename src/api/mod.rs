//! Remote data: the per-year timeline and the document search.

mod client;

pub use client::ApiClient;

use crate::error::FetchError;
use crate::search::{Query, SearchResult};
use crate::timeline::types::TimePoint;

/// Where timeline data and search results come from
pub trait Backend: Send + Sync {
    /// Every time point, ordered by year
    fn fetch_timeline(&self) -> Result<Vec<TimePoint>, FetchError>;

    /// One page of documents for `query`
    fn search(&self, query: &Query) -> Result<SearchResult, FetchError>;
}
