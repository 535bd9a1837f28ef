//! Base query DSL
//!
//! The subset of query primitives a facet can wrap (query facets), scope by
//! (`facet_filter`), or that a search body can carry. Queries are only ever
//! serialized into request bodies; they are never evaluated here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Query DSL node
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Query {
    /// Match all documents
    MatchAll(MatchAllQuery),

    /// Match query (analyzed full-text)
    Match(HashMap<String, Value>),

    /// Term query (exact match, not analyzed)
    Term(HashMap<String, Value>),

    /// Terms query (any of several exact values)
    Terms(HashMap<String, Vec<Value>>),

    /// Range query
    Range(HashMap<String, RangeParams>),

    /// Bool query (must, should, must_not)
    Bool(BoolQuery),

    /// Exists query
    Exists(ExistsQuery),

    /// Query string (Lucene syntax)
    QueryString(QueryStringQuery),

    /// Anything else, passed through verbatim
    #[serde(untagged)]
    Raw(Value),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MatchAllQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RangeParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BoolQuery {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<Query>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<Query>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must_not: Vec<Query>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_should_match: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExistsQuery {
    pub field: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QueryStringQuery {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_field: Option<String>,
}

impl Query {
    pub fn match_all() -> Self {
        Query::MatchAll(MatchAllQuery::default())
    }

    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Query::Term(HashMap::from([(field.into(), value.into())]))
    }

    pub fn terms<V: Into<Value>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        Query::Terms(HashMap::from([(field.into(), values)]))
    }

    pub fn matches(field: impl Into<String>, text: impl Into<String>) -> Self {
        Query::Match(HashMap::from([(field.into(), Value::String(text.into()))]))
    }

    pub fn range(field: impl Into<String>, params: RangeParams) -> Self {
        Query::Range(HashMap::from([(field.into(), params)]))
    }

    pub fn exists(field: impl Into<String>) -> Self {
        Query::Exists(ExistsQuery {
            field: field.into(),
        })
    }

    pub fn query_string(query: impl Into<String>) -> Self {
        Query::QueryString(QueryStringQuery {
            query: query.into(),
            default_field: None,
        })
    }

    pub fn bool(bool_query: BoolQuery) -> Self {
        Query::Bool(bool_query)
    }

    /// Serialize to the wire form
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<Value> for Query {
    fn from(value: Value) -> Self {
        Query::Raw(value)
    }
}
