//! Typed facet results
//!
//! The server tags every facet payload with a `_type` discriminator. Each
//! known discriminator decodes into its own variant of [`Facet`]; anything
//! else becomes [`Facet::Unknown`], which keeps only the type and total.

mod decode;
mod search;
mod store;

pub use decode::FacetDecoder;
pub use search::{SearchHit, SearchHits, SearchResult, TotalHits};
pub use store::Facets;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One decoded facet
#[derive(Debug, Clone, PartialEq)]
pub enum Facet {
    Terms(TermsResult),
    Range(RangeResult),
    Histogram(HistogramResult),
    DateHistogram(DateHistogramResult),
    Query(CountResult),
    Filter(CountResult),
    Statistical(StatisticalResult),
    TermsStats(TermsStatsResult),
    /// Discriminator this client has no decoder for
    Unknown(UnknownFacet),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TermsResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<u64>,
    /// Server order; already sorted by the request's `order`
    pub terms: Vec<TermEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TermEntry {
    #[serde(deserialize_with = "term_string")]
    pub term: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RangeResult {
    /// Positionally aligned with the requested ranges
    pub ranges: Vec<RangeEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RangeEntry {
    /// `None` means open below; never defaulted to zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<f64>,
    /// `None` means open above
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_str: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_str: Option<String>,
    pub count: u64,
    /// Omitted by the server when no value was collected
    #[serde(default)]
    pub total_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HistogramResult {
    /// Ascending by key, as returned
    pub entries: Vec<HistogramEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HistogramEntry {
    pub key: f64,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DateHistogramResult {
    /// Ascending by time, as returned
    pub entries: Vec<DateHistogramEntry>,
}

/// One calendar bucket.
///
/// The statistics are only present when the facet had a key/value field
/// pair, and are the server's numbers: `mean` is never recomputed from
/// `total / total_count`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DateHistogramEntry {
    /// Bucket start, epoch milliseconds UTC
    pub time: i64,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
}

impl DateHistogramEntry {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time)
    }
}

/// Query and filter facets: a single document count
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CountResult {
    #[serde(alias = "count")]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StatisticalResult {
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sum_of_squares: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_deviation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TermsStatsResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<u64>,
    pub terms: Vec<TermsStatsEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TermsStatsEntry {
    #[serde(deserialize_with = "term_string")]
    pub term: String,
    pub count: u64,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnknownFacet {
    #[serde(skip)]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Key of one bucket, typed per facet kind
#[derive(Debug, Clone, PartialEq)]
pub enum BucketKey {
    Term(String),
    Number(f64),
    /// Epoch milliseconds UTC
    Time(i64),
    Range { from: Option<f64>, to: Option<f64> },
}

impl std::fmt::Display for BucketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BucketKey::Term(t) => f.write_str(t),
            BucketKey::Number(n) => write!(f, "{}", n),
            BucketKey::Time(ms) => match DateTime::from_timestamp_millis(*ms) {
                Some(ts) => write!(f, "{}", ts.to_rfc3339()),
                None => write!(f, "{}", ms),
            },
            BucketKey::Range { from, to } => {
                let from = from.map_or_else(|| "*".to_string(), |v| v.to_string());
                let to = to.map_or_else(|| "*".to_string(), |v| v.to_string());
                write!(f, "{}..{}", from, to)
            }
        }
    }
}

/// A key and its document count
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub key: BucketKey,
    pub count: u64,
}

impl Facet {
    /// Discriminator as reported by the server
    pub fn facet_type(&self) -> &str {
        match self {
            Facet::Terms(_) => "terms",
            Facet::Range(_) => "range",
            Facet::Histogram(_) => "histogram",
            Facet::DateHistogram(_) => "date_histogram",
            Facet::Query(_) => "query",
            Facet::Filter(_) => "filter",
            Facet::Statistical(_) => "statistical",
            Facet::TermsStats(_) => "terms_stats",
            Facet::Unknown(u) => &u.kind,
        }
    }

    /// Documents the facet saw, when the server reports it
    pub fn total(&self) -> Option<u64> {
        match self {
            Facet::Terms(t) => t.total,
            Facet::Query(c) | Facet::Filter(c) => Some(c.total),
            Facet::Statistical(s) => Some(s.count),
            Facet::Unknown(u) => u.total,
            Facet::Range(_) | Facet::Histogram(_) | Facet::DateHistogram(_) | Facet::TermsStats(_) => {
                None
            }
        }
    }

    /// Every bucket in server order; empty for count-only facets
    pub fn buckets(&self) -> Vec<Bucket> {
        match self {
            Facet::Terms(t) => t
                .terms
                .iter()
                .map(|e| Bucket {
                    key: BucketKey::Term(e.term.clone()),
                    count: e.count,
                })
                .collect(),
            Facet::Range(r) => r
                .ranges
                .iter()
                .map(|e| Bucket {
                    key: BucketKey::Range {
                        from: e.from,
                        to: e.to,
                    },
                    count: e.count,
                })
                .collect(),
            Facet::Histogram(h) => h
                .entries
                .iter()
                .map(|e| Bucket {
                    key: BucketKey::Number(e.key),
                    count: e.count,
                })
                .collect(),
            Facet::DateHistogram(h) => h
                .entries
                .iter()
                .map(|e| Bucket {
                    key: BucketKey::Time(e.time),
                    count: e.count,
                })
                .collect(),
            Facet::TermsStats(t) => t
                .terms
                .iter()
                .map(|e| Bucket {
                    key: BucketKey::Term(e.term.clone()),
                    count: e.count,
                })
                .collect(),
            Facet::Query(_) | Facet::Filter(_) | Facet::Statistical(_) | Facet::Unknown(_) => {
                Vec::new()
            }
        }
    }

    pub fn as_terms(&self) -> Option<&TermsResult> {
        match self {
            Facet::Terms(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<&RangeResult> {
        match self {
            Facet::Range(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_histogram(&self) -> Option<&HistogramResult> {
        match self {
            Facet::Histogram(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_date_histogram(&self) -> Option<&DateHistogramResult> {
        match self {
            Facet::DateHistogram(h) => Some(h),
            _ => None,
        }
    }

    /// Count of a query or filter facet
    pub fn as_count(&self) -> Option<&CountResult> {
        match self {
            Facet::Query(c) | Facet::Filter(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_statistical(&self) -> Option<&StatisticalResult> {
        match self {
            Facet::Statistical(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_terms_stats(&self) -> Option<&TermsStatsResult> {
        match self {
            Facet::TermsStats(t) => Some(t),
            _ => None,
        }
    }

    /// Re-encode in the server's wire form, `_type` included
    pub fn to_value(&self) -> Value {
        let body = match self {
            Facet::Terms(t) => serde_json::to_value(t),
            Facet::Range(r) => serde_json::to_value(r),
            Facet::Histogram(h) => serde_json::to_value(h),
            Facet::DateHistogram(h) => serde_json::to_value(h),
            Facet::Query(c) | Facet::Filter(c) => serde_json::to_value(c),
            Facet::Statistical(s) => serde_json::to_value(s),
            Facet::TermsStats(t) => serde_json::to_value(t),
            Facet::Unknown(u) => serde_json::to_value(u),
        };
        let mut map = match body {
            Ok(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        map.insert(
            "_type".to_string(),
            Value::String(self.facet_type().to_string()),
        );
        Value::Object(map)
    }
}

impl Serialize for Facet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Terms arrive as strings, or as numbers for numeric fields
fn term_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number term, got {}",
            other
        ))),
    }
}
