//! Search result documents and their list rendering.

use crate::timeline::types::Year;
use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A catalogue record returned by `search.json`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Document {
    pub name: String,
    pub year: Year,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub desc: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub terms: Vec<String>,
}

/// One page of results plus the overall match count
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub docs: Vec<Document>,
    #[serde(default)]
    pub total: u64,
}

/// A document ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    pub name: String,
    pub year: Year,
    /// Link target, `#` when the record has no URL
    pub href: String,
    pub authors: String,
    pub desc: String,
    /// Clickable term chips
    pub terms: Vec<String>,
}

impl From<Document> for ResultItem {
    fn from(doc: Document) -> Self {
        let href = match doc.url {
            Some(url) if !url.is_empty() => url,
            _ => "#".to_string(),
        };
        Self {
            name: doc.name,
            year: doc.year,
            href,
            authors: doc.author.join(","),
            desc: doc.desc,
            terms: doc.terms,
        }
    }
}

/// The rendered result list for the last applied search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultList {
    items: Vec<ResultItem>,
}

impl ResultList {
    pub fn from_docs(docs: Vec<Document>) -> Self {
        Self {
            items: docs.into_iter().map(ResultItem::from).collect(),
        }
    }

    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
