//! Search state: the canonical query, the result list and the pager.

pub mod pager;
pub mod query;
pub mod results;

pub use query::{Applied, Query, QueryState, SearchRequest, SearchResponse};
pub use results::SearchResult;
