//! Timeline data types matching the `data.json` response.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A year as the server sends it.
///
/// `data.json` quotes years while `search.json` sends them as numbers; both
/// land here as text. The empty year means "no year filter".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RawYear", into = "String")]
pub struct Year(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawYear {
    Text(String),
    Number(i64),
}

impl From<RawYear> for Year {
    fn from(raw: RawYear) -> Self {
        match raw {
            RawYear::Text(s) => Year(s),
            RawYear::Number(n) => Year(n.to_string()),
        }
    }
}

impl From<Year> for String {
    fn from(year: Year) -> Self {
        year.0
    }
}

impl Year {
    /// No year filter
    pub fn any() -> Self {
        Year(String::new())
    }

    pub fn new(year: impl Into<String>) -> Self {
        Year(year.into())
    }

    pub fn is_any(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A keyword and how often it occurs in one year
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Keyword {
    pub value: String,
    pub count: u32,
}

impl Keyword {
    pub fn new(value: impl Into<String>, count: u32) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

/// One point on the timeline.
///
/// `keywords` arrives ranked by descending count; the first entry is the
/// representative keyword shown under the marker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimePoint {
    pub year: Year,
    pub quantity: f64,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
}

impl TimePoint {
    /// Highest-count keyword, if the year has any
    pub fn representative(&self) -> Option<&Keyword> {
        self.keywords.first()
    }
}

/// Year select options: "all years" first, then each distinct year in dataset order
pub fn year_options(data: &[TimePoint]) -> Vec<Year> {
    let mut options = vec![Year::any()];
    for point in data {
        if !options.contains(&point.year) {
            options.push(point.year.clone());
        }
    }
    options
}
