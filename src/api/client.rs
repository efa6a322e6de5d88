//! HTTP client for the timeline and search endpoints.

use super::Backend;
use crate::error::FetchError;
use crate::search::{Query, SearchResult};
use crate::timeline::types::TimePoint;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// URL of the per-year keyword statistics
    pub fn timeline_url(&self) -> String {
        format!("{}/data.json", self.base_url)
    }

    /// URL for one page of search results
    pub fn search_url(&self, query: &Query) -> String {
        format!(
            "{}/search.json?word={}&year={}&start={}&limit={}",
            self.base_url,
            urlencoding::encode(&query.word),
            urlencoding::encode(query.year.as_str()),
            query.start(),
            query.page_size
        )
    }

    fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        let resp = match self.client.get(&url).send() {
            Ok(resp) => resp,
            Err(source) => return Err(FetchError::Request { url, source }),
        };

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                url,
                status: resp.status(),
            });
        }

        resp.json().map_err(|source| FetchError::Decode { url, source })
    }
}

impl Backend for ApiClient {
    fn fetch_timeline(&self) -> Result<Vec<TimePoint>, FetchError> {
        self.get_json(self.timeline_url())
    }

    fn search(&self, query: &Query) -> Result<SearchResult, FetchError> {
        self.get_json(self.search_url(query))
    }
}
