use super::{check_field, check_key_value_pair, FacetBuilder, FacetKind, FacetScope, FacetSpec};
use crate::error::FacetError;
use crate::range::RangeBoundary;
use crate::Result;
use serde::Serialize;

/// Compiled `range` facet body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSpec {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_field: Option<String>,
    /// Response buckets line up with these by position
    pub ranges: Vec<RangeBoundary>,
}

/// Document counts per numeric range.
///
/// Every boundary call appends a new entry; nothing is overwritten.
#[derive(Debug, Clone, Default)]
pub struct RangeFacet {
    field: String,
    key_field: Option<String>,
    value_field: Option<String>,
    ranges: Vec<RangeBoundary>,
    scope: FacetScope,
}

impl RangeFacet {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }

    /// Append a range open below: `(*, to)`
    pub fn less_than(self, to: f64) -> Self {
        self.add_range(RangeBoundary::less_than(to))
    }

    /// Append a range open above: `[from, *)`
    pub fn greater_than(self, from: f64) -> Self {
        self.add_range(RangeBoundary::greater_than(from))
    }

    /// Append a closed range: `[from, to)`
    pub fn between(self, from: f64, to: f64) -> Self {
        self.add_range(RangeBoundary::between(from, to))
    }

    pub fn add_range(mut self, boundary: RangeBoundary) -> Self {
        self.ranges.push(boundary);
        self
    }

    /// Field that picks the bucket; defaults to `field`
    pub fn key_field(mut self, key_field: impl Into<String>) -> Self {
        self.key_field = Some(key_field.into());
        self
    }

    /// Field whose statistics are reported per bucket
    pub fn value_field(mut self, value_field: impl Into<String>) -> Self {
        self.value_field = Some(value_field.into());
        self
    }
}

impl FacetBuilder for RangeFacet {
    fn build(self) -> Result<FacetSpec> {
        check_field("range", &self.field)?;
        check_key_value_pair("range", &self.key_field, &self.value_field)?;
        if self.ranges.is_empty() {
            return Err(FacetError::config(format!(
                "range facet on '{}' needs at least one range",
                self.field
            )));
        }
        if let Some(bad) = self
            .ranges
            .iter()
            .find(|r| r.from.into_iter().chain(r.to).any(|b| !b.is_finite()))
        {
            return Err(FacetError::config(format!(
                "range facet on '{}' has a non-finite bound: {}",
                self.field, bad
            )));
        }

        Ok(FacetSpec::new(
            FacetKind::Range(RangeSpec {
                field: self.field,
                key_field: self.key_field,
                value_field: self.value_field,
                ranges: self.ranges,
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
    fn test_range_wire_form_omits_open_bounds() {
        let spec = RangeFacet::new("retweets")
            .less_than(10.0)
            .between(10.0, 100.0)
            .greater_than(100.0)
            .build()
            .unwrap();
        assert_eq!(
            spec.to_value(),
            json!({"range": {
                "field": "retweets",
                "ranges": [
                    {"to": 10.0},
                    {"from": 10.0, "to": 100.0},
                    {"from": 100.0}
                ]
            }})
        );
    }

    #[test]
    fn test_range_calls_append_in_order() {
        let spec = RangeFacet::new("retweets")
            .greater_than(100.0)
            .less_than(10.0)
            .less_than(5.0)
            .build()
            .unwrap();
        match spec.kind() {
            FacetKind::Range(r) => {
                assert_eq!(
                    r.ranges,
                    vec![
                        RangeBoundary::greater_than(100.0),
                        RangeBoundary::less_than(10.0),
                        RangeBoundary::less_than(5.0),
                    ]
                );
            }
            other => panic!("Expected range spec, got {:?}", other),
        }
    }

    #[test]
    fn test_range_without_boundaries_is_configuration_error() {
        let err = RangeFacet::new("retweets").build().unwrap_err();
        assert!(matches!(err, FacetError::Configuration(_)));
    }

    #[test]
    fn test_range_non_finite_bound_is_configuration_error() {
        for facet in [
            RangeFacet::new("retweets").less_than(f64::NAN),
            RangeFacet::new("retweets").greater_than(f64::INFINITY),
            RangeFacet::new("retweets")
                .less_than(10.0)
                .between(f64::NEG_INFINITY, 100.0),
        ] {
            let err = facet.build().unwrap_err();
            assert!(matches!(err, FacetError::Configuration(_)));
            assert!(err.to_string().contains("non-finite"));
        }
    }

    #[test]
    fn test_range_key_value_fields() {
        let spec = RangeFacet::new("created")
            .key_field("created")
            .value_field("retweets")
            .less_than(1_000.0)
            .build()
            .unwrap();
        assert_eq!(
            spec.to_value(),
            json!({"range": {
                "field": "created",
                "key_field": "created",
                "value_field": "retweets",
                "ranges": [{"to": 1000.0}]
            }})
        );

        let err = RangeFacet::new("created")
            .key_field("created")
            .less_than(1.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, FacetError::Configuration(_)));
    }
}
