//! Search response envelope

use super::{FacetDecoder, Facets};
use crate::error::FacetError;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded search response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub took: u64,
    pub timed_out: bool,
    pub hits: SearchHits,
    pub facets: Facets,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SearchHits {
    #[serde(default)]
    pub total: TotalHits,
    #[serde(default)]
    pub max_score: Option<f64>,
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// Older servers report a bare count, newer ones an object
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TotalHits {
    Count(u64),
    Object { value: u64, relation: String },
}

impl Default for TotalHits {
    fn default() -> Self {
        TotalHits::Count(0)
    }
}

impl TotalHits {
    pub fn value(&self) -> u64 {
        match self {
            TotalHits::Count(n) => *n,
            TotalHits::Object { value, .. } => *value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchHit {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
}

#[derive(Deserialize)]
struct RawSearchResponse {
    #[serde(default)]
    took: u64,
    #[serde(default)]
    timed_out: bool,
    #[serde(default)]
    hits: SearchHits,
    #[serde(default)]
    facets: Value,
}

impl SearchResult {
    /// Decode a response body. A malformed facet fails the whole result.
    pub fn from_value(value: Value) -> Result<Self> {
        let raw: RawSearchResponse = serde_json::from_value(value)
            .map_err(|e| FacetError::MalformedResponse(e.to_string()))?;
        let facets = FacetDecoder::decode_value(&raw.facets)?;

        Ok(Self {
            took: raw.took,
            timed_out: raw.timed_out,
            hits: raw.hits,
            facets,
        })
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    pub fn total_hits(&self) -> u64 {
        self.hits.total.value()
    }
}
