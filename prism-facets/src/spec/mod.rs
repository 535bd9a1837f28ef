//! Facet spec builders
//!
//! Each builder accumulates configuration for one facet kind and compiles it
//! with [`FacetBuilder::build`] into an immutable [`FacetSpec`]. Compilation
//! is pure: caller mistakes surface as [`FacetError::Configuration`] here,
//! before anything is sent.
//!
//! Supported kinds:
//! - `terms`
//! - `range`
//! - `histogram` (numeric or duration interval)
//! - `date_histogram` (calendar interval, optional key/value statistics)
//! - `query` / `filter`
//! - `statistical` / `terms_stats`

mod date_histogram;
mod histogram;
mod query;
mod range;
mod statistical;
mod terms;

pub use date_histogram::{CalendarInterval, DateHistogramFacet, DateHistogramSpec};
pub use histogram::{HistogramFacet, HistogramInterval, HistogramSpec};
pub use query::{FilterFacet, QueryFacet, QuerySpec};
pub use range::{RangeFacet, RangeSpec};
pub use statistical::{
    StatisticalFacet, StatisticalSpec, TermsStatsFacet, TermsStatsOrder, TermsStatsSpec,
};
pub use terms::{TermsFacet, TermsSpec};

use crate::error::FacetError;
use crate::query::Query;
use crate::Result;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A compiled facet, ready to be placed in a request under its name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetSpec {
    #[serde(flatten)]
    kind: FacetKind,
    #[serde(flatten)]
    scope: FacetScope,
}

/// Kind-specific body of a compiled facet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    Terms(TermsSpec),
    Range(RangeSpec),
    Histogram(HistogramSpec),
    DateHistogram(DateHistogramSpec),
    Query(QuerySpec),
    Filter(Query),
    Statistical(StatisticalSpec),
    TermsStats(TermsStatsSpec),
}

impl FacetKind {
    /// Discriminator used on the wire
    pub fn name(&self) -> &'static str {
        match self {
            FacetKind::Terms(_) => "terms",
            FacetKind::Range(_) => "range",
            FacetKind::Histogram(_) => "histogram",
            FacetKind::DateHistogram(_) => "date_histogram",
            FacetKind::Query(_) => "query",
            FacetKind::Filter(_) => "filter",
            FacetKind::Statistical(_) => "statistical",
            FacetKind::TermsStats(_) => "terms_stats",
        }
    }
}

/// Options every facet kind accepts, serialized next to the kind key
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacetScope {
    /// Ignore the main query and aggregate over the whole index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet_filter: Option<Query>,
}

impl FacetSpec {
    pub(crate) fn new(kind: FacetKind, scope: FacetScope) -> Self {
        Self { kind, scope }
    }

    pub fn kind(&self) -> &FacetKind {
        &self.kind
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn scope(&self) -> &FacetScope {
        &self.scope
    }

    pub fn is_global(&self) -> bool {
        self.scope.global.unwrap_or(false)
    }

    /// Serialize to the wire form
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Common builder surface.
///
/// Builders are owned values: every setter consumes and returns the
/// builder, and `build` consumes it into a [`FacetSpec`].
pub trait FacetBuilder: Sized {
    /// Compile into an immutable spec
    fn build(self) -> Result<FacetSpec>;

    fn scope_mut(&mut self) -> &mut FacetScope;

    /// Run this facet over the whole index instead of the query's hits
    fn global(mut self, global: bool) -> Self {
        self.scope_mut().global = Some(global);
        self
    }

    /// Restrict the documents this facet sees
    fn facet_filter(mut self, filter: Query) -> Self {
        self.scope_mut().facet_filter = Some(filter);
        self
    }
}

impl FacetBuilder for FacetSpec {
    fn build(self) -> Result<FacetSpec> {
        Ok(self)
    }

    fn scope_mut(&mut self) -> &mut FacetScope {
        &mut self.scope
    }
}

/// Ordering of term-like buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TermsOrder {
    Count,
    Term,
}

impl TermsOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            TermsOrder::Count => "count",
            TermsOrder::Term => "term",
        }
    }
}

impl FromStr for TermsOrder {
    type Err = FacetError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "count" => Ok(TermsOrder::Count),
            "term" => Ok(TermsOrder::Term),
            other => Err(FacetError::config(format!(
                "invalid order '{}', expected one of: count, term",
                other
            ))),
        }
    }
}

impl fmt::Display for TermsOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an optional order string held by a builder
pub(crate) fn parse_order<T: FromStr<Err = FacetError>>(order: Option<&str>) -> Result<Option<T>> {
    order.map(str::parse).transpose()
}

/// Key and value fields must be set together
pub(crate) fn check_key_value_pair(
    kind: &str,
    key_field: &Option<String>,
    value_field: &Option<String>,
) -> Result<()> {
    match (key_field, value_field) {
        (Some(_), None) => Err(FacetError::config(format!(
            "{} facet has key_field but no value_field",
            kind
        ))),
        (None, Some(_)) => Err(FacetError::config(format!(
            "{} facet has value_field but no key_field",
            kind
        ))),
        _ => Ok(()),
    }
}

pub(crate) fn check_field(kind: &str, field: &str) -> Result<()> {
    if field.trim().is_empty() {
        return Err(FacetError::config(format!("{} facet requires a field", kind)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_terms_order_parse() {
        assert_eq!("count".parse::<TermsOrder>().unwrap(), TermsOrder::Count);
        assert_eq!("term".parse::<TermsOrder>().unwrap(), TermsOrder::Term);
        let err = "reverse".parse::<TermsOrder>().unwrap_err();
        assert!(matches!(err, FacetError::Configuration(_)));
    }

    #[test]
    fn test_scope_serialized_next_to_kind() {
        let spec = TermsFacet::new("user")
            .global(true)
            .facet_filter(Query::term("user", "olivere"))
            .build()
            .unwrap();
        assert!(spec.is_global());
        assert_eq!(
            spec.to_value(),
            json!({
                "terms": {"field": "user"},
                "global": true,
                "facet_filter": {"term": {"user": "olivere"}}
            })
        );
    }

    #[test]
    fn test_spec_is_its_own_builder() {
        let spec = TermsFacet::new("user").build().unwrap();
        let rescoped = spec.clone().global(true).build().unwrap();
        assert!(!spec.is_global());
        assert!(rescoped.is_global());
        assert_eq!(rescoped.kind(), spec.kind());
    }

    #[test]
    fn test_key_value_pairing() {
        assert!(check_key_value_pair("range", &None, &None).is_ok());
        assert!(check_key_value_pair("range", &Some("a".into()), &Some("b".into())).is_ok());
        assert!(check_key_value_pair("range", &Some("a".into()), &None).is_err());
        assert!(check_key_value_pair("range", &None, &Some("b".into())).is_err());
    }

    #[test]
    fn test_kind_names() {
        let spec = RangeFacet::new("retweets").less_than(10.0).build().unwrap();
        assert_eq!(spec.kind_name(), "range");
        let spec = QueryFacet::new(Query::match_all()).build().unwrap();
        assert_eq!(spec.kind_name(), "query");
    }
}
