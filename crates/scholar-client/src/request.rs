//! Search request and response bodies.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Body of a `POST {search_url}/search` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// A combined boolean query or a query string
    pub query: Value,
    pub sort: Vec<Value>,
    pub include: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    pub size: u32,
    #[serde(rename = "from", skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    pub stemming: bool,
    pub regex: bool,
    pub min_score: f64,
    /// Scroll context lifetime, e.g. `"1m"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_id: Option<String>,
}

pub const DEFAULT_INCLUDE: [&str; 4] = ["title", "abstract", "authors", "lens_id"];

/// Projection for scrolled pages; abstracts are left out.
pub const SCROLL_INCLUDE: [&str; 3] = ["title", "authors", "lens_id"];

/// Largest page the service returns while scrolling.
pub const MAX_SCROLL_SIZE: u32 = 1000;

impl SearchRequest {
    pub fn new(query: impl Into<Value>) -> Self {
        Self {
            query: query.into(),
            sort: vec![json!({"relevance": "desc"})],
            include: DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect(),
            exclude: None,
            size: 10,
            offset: Some(0),
            stemming: true,
            regex: false,
            min_score: 0.0,
            scroll: None,
            scroll_id: None,
        }
    }

    /// Request for scrolling through every result, one full page at a time.
    pub fn scroll(query: impl Into<Value>) -> Self {
        Self {
            size: MAX_SCROLL_SIZE,
            include: SCROLL_INCLUDE.iter().map(|s| s.to_string()).collect(),
            offset: None,
            scroll: Some("1m".to_string()),
            ..Self::new(query)
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_sort(mut self, sort: Vec<Value>) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_include<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclude<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_stemming(mut self, stemming: bool) -> Self {
        self.stemming = stemming;
        self
    }

    pub fn with_regex(mut self, regex: bool) -> Self {
        self.regex = regex;
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_scroll_id(mut self, scroll_id: impl Into<String>) -> Self {
        self.scroll_id = Some(scroll_id.into());
        self
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScholarResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_id: Option<String>,
    /// Anything else the service sent back
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
