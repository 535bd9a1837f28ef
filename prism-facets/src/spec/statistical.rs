use super::{check_field, parse_order, FacetBuilder, FacetKind, FacetScope, FacetSpec};
use crate::error::FacetError;
use crate::Result;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Compiled `statistical` facet body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticalSpec {
    Field(String),
    Fields(Vec<String>),
}

/// Count, min, max, mean, variance over one or more numeric fields
#[derive(Debug, Clone, Default)]
pub struct StatisticalFacet {
    target: Option<StatisticalSpec>,
    scope: FacetScope,
}

impl StatisticalFacet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single field; replaces any field list
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.target = Some(StatisticalSpec::Field(field.into()));
        self
    }

    /// Combined statistics over several fields; replaces a single field
    pub fn fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.target = Some(StatisticalSpec::Fields(
            fields.into_iter().map(Into::into).collect(),
        ));
        self
    }
}

impl FacetBuilder for StatisticalFacet {
    fn build(self) -> Result<FacetSpec> {
        let target = match self.target {
            Some(StatisticalSpec::Field(field)) => {
                check_field("statistical", &field)?;
                StatisticalSpec::Field(field)
            }
            Some(StatisticalSpec::Fields(fields)) if !fields.is_empty() => {
                for field in &fields {
                    check_field("statistical", field)?;
                }
                StatisticalSpec::Fields(fields)
            }
            _ => {
                return Err(FacetError::config(
                    "statistical facet needs a field or a non-empty field list",
                ))
            }
        };
        Ok(FacetSpec::new(FacetKind::Statistical(target), self.scope))
    }

    fn scope_mut(&mut self) -> &mut FacetScope {
        &mut self.scope
    }
}

/// Ordering of `terms_stats` buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TermsStatsOrder {
    Term,
    ReverseTerm,
    Count,
    ReverseCount,
    Total,
    ReverseTotal,
    Min,
    ReverseMin,
    Max,
    ReverseMax,
    Mean,
    ReverseMean,
}

impl TermsStatsOrder {
    pub const ALL: [TermsStatsOrder; 12] = [
        TermsStatsOrder::Term,
        TermsStatsOrder::ReverseTerm,
        TermsStatsOrder::Count,
        TermsStatsOrder::ReverseCount,
        TermsStatsOrder::Total,
        TermsStatsOrder::ReverseTotal,
        TermsStatsOrder::Min,
        TermsStatsOrder::ReverseMin,
        TermsStatsOrder::Max,
        TermsStatsOrder::ReverseMax,
        TermsStatsOrder::Mean,
        TermsStatsOrder::ReverseMean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TermsStatsOrder::Term => "term",
            TermsStatsOrder::ReverseTerm => "reverse_term",
            TermsStatsOrder::Count => "count",
            TermsStatsOrder::ReverseCount => "reverse_count",
            TermsStatsOrder::Total => "total",
            TermsStatsOrder::ReverseTotal => "reverse_total",
            TermsStatsOrder::Min => "min",
            TermsStatsOrder::ReverseMin => "reverse_min",
            TermsStatsOrder::Max => "max",
            TermsStatsOrder::ReverseMax => "reverse_max",
            TermsStatsOrder::Mean => "mean",
            TermsStatsOrder::ReverseMean => "reverse_mean",
        }
    }
}

impl FromStr for TermsStatsOrder {
    type Err = FacetError;

    fn from_str(s: &str) -> Result<Self> {
        TermsStatsOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| FacetError::config(format!("invalid terms_stats order '{}'", s)))
    }
}

impl fmt::Display for TermsStatsOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiled `terms_stats` facet body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermsStatsSpec {
    pub key_field: String,
    pub value_field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<TermsStatsOrder>,
}

/// Per-term statistics: terms come from `key_field`, numbers from `value_field`
#[derive(Debug, Clone)]
pub struct TermsStatsFacet {
    key_field: String,
    value_field: String,
    size: Option<usize>,
    order: Option<String>,
    scope: FacetScope,
}

impl TermsStatsFacet {
    pub fn new(key_field: impl Into<String>, value_field: impl Into<String>) -> Self {
        Self {
            key_field: key_field.into(),
            value_field: value_field.into(),
            size: None,
            order: None,
            scope: FacetScope::default(),
        }
    }

    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }
}

impl FacetBuilder for TermsStatsFacet {
    fn build(self) -> Result<FacetSpec> {
        check_field("terms_stats", &self.key_field)?;
        check_field("terms_stats", &self.value_field)?;
        let order = parse_order::<TermsStatsOrder>(self.order.as_deref())?;

        Ok(FacetSpec::new(
            FacetKind::TermsStats(TermsStatsSpec {
                key_field: self.key_field,
                value_field: self.value_field,
                size: self.size,
                order,
            }),
            self.scope,
        ))
    }

    fn scope_mut(&mut self) -> &mut FacetScope {
        &mut self.scope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_statistical_single_field() {
        let spec = StatisticalFacet::new().field("retweets").build().unwrap();
        assert_eq!(
            spec.to_value(),
            json!({"statistical": {"field": "retweets"}})
        );
    }

    #[test]
    fn test_statistical_fields_replace_field() {
        let spec = StatisticalFacet::new()
            .field("retweets")
            .fields(["retweets", "likes"])
            .build()
            .unwrap();
        assert_eq!(
            spec.to_value(),
            json!({"statistical": {"fields": ["retweets", "likes"]}})
        );
    }

    #[test]
    fn test_statistical_needs_target() {
        assert!(StatisticalFacet::new().build().is_err());
        assert!(StatisticalFacet::new()
            .fields(Vec::<String>::new())
            .build()
            .is_err());
    }

    #[test]
    fn test_terms_stats_wire_form() {
        let spec = TermsStatsFacet::new("user", "retweets")
            .size(5)
            .order("reverse_total")
            .build()
            .unwrap();
        assert_eq!(
            spec.to_value(),
            json!({"terms_stats": {
                "key_field": "user",
                "value_field": "retweets",
                "size": 5,
                "order": "reverse_total"
            }})
        );
    }

    #[test]
    fn test_terms_stats_invalid_order() {
        let err = TermsStatsFacet::new("user", "retweets")
            .order("loudest")
            .build()
            .unwrap_err();
        assert!(matches!(err, FacetError::Configuration(_)));
    }

    #[test]
    fn test_terms_stats_order_parse_all() {
        for order in TermsStatsOrder::ALL {
            assert_eq!(order.as_str().parse::<TermsStatsOrder>().unwrap(), order);
        }
    }
}
