//! Error types for remote fetches.
//!
//! Every failure here degrades to a stale or empty view; nothing is fatal.

use thiserror::Error;

/// Failure talking to the dataset or search endpoints.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a response (connection refused, DNS, ...)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The body was not the JSON shape we expect
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The background job died before producing a result
    #[error("background job ended before responding")]
    Disconnected,
}
