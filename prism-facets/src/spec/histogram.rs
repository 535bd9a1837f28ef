use super::{check_field, FacetBuilder, FacetKind, FacetScope, FacetSpec};
use crate::error::FacetError;
use crate::Result;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?(ms|s|m|h|d|w)$").expect("valid duration regex"));

/// The one interval a histogram carries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HistogramInterval {
    #[serde(rename = "interval")]
    Numeric(f64),
    /// Duration string such as `1m` or `12h`, for temporal fields
    #[serde(rename = "time_interval")]
    Duration(String),
}

/// Compiled `histogram` facet body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSpec {
    pub field: String,
    #[serde(flatten)]
    pub interval: HistogramInterval,
}

/// Fixed-width buckets over a numeric or temporal field
#[derive(Debug, Clone, Default)]
pub struct HistogramFacet {
    field: String,
    interval: Option<HistogramInterval>,
    scope: FacetScope,
}

impl HistogramFacet {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }

    /// Numeric bucket width; replaces any duration interval
    pub fn interval(mut self, interval: f64) -> Self {
        self.interval = Some(HistogramInterval::Numeric(interval));
        self
    }

    /// Duration bucket width; replaces any numeric interval
    pub fn time_interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = Some(HistogramInterval::Duration(interval.into()));
        self
    }
}

impl FacetBuilder for HistogramFacet {
    fn build(self) -> Result<FacetSpec> {
        check_field("histogram", &self.field)?;
        let interval = match self.interval {
            None => {
                return Err(FacetError::config(format!(
                    "histogram facet on '{}' needs an interval or time_interval",
                    self.field
                )))
            }
            Some(HistogramInterval::Numeric(n)) if !n.is_finite() || n <= 0.0 => {
                return Err(FacetError::config(format!(
                    "histogram interval must be a positive number, got {}",
                    n
                )))
            }
            Some(HistogramInterval::Duration(d)) if !DURATION.is_match(&d) => {
                return Err(FacetError::config(format!(
                    "invalid histogram time_interval '{}'",
                    d
                )))
            }
            Some(interval) => interval,
        };

        Ok(FacetSpec::new(
            FacetKind::Histogram(HistogramSpec {
                field: self.field,
                interval,
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
    fn test_numeric_interval_wire_form() {
        let spec = HistogramFacet::new("retweets").interval(100.0).build().unwrap();
        assert_eq!(
            spec.to_value(),
            json!({"histogram": {"field": "retweets", "interval": 100.0}})
        );
    }

    #[test]
    fn test_time_interval_wire_form() {
        let spec = HistogramFacet::new("retweets")
            .time_interval("1m")
            .build()
            .unwrap();
        assert_eq!(
            spec.to_value(),
            json!({"histogram": {"field": "retweets", "time_interval": "1m"}})
        );
    }

    #[test]
    fn test_last_interval_wins() {
        let spec = HistogramFacet::new("retweets")
            .time_interval("1m")
            .interval(50.0)
            .build()
            .unwrap();
        let value = spec.to_value();
        assert_eq!(value["histogram"]["interval"], json!(50.0));
        assert!(value["histogram"].get("time_interval").is_none());

        let spec = HistogramFacet::new("retweets")
            .interval(50.0)
            .time_interval("2h")
            .build()
            .unwrap();
        let value = spec.to_value();
        assert_eq!(value["histogram"]["time_interval"], json!("2h"));
        assert!(value["histogram"].get("interval").is_none());
    }

    #[test]
    fn test_missing_interval_rejected() {
        let err = HistogramFacet::new("retweets").build().unwrap_err();
        assert!(matches!(err, FacetError::Configuration(_)));
    }

    #[test]
    fn test_bad_intervals_rejected() {
        assert!(HistogramFacet::new("r").interval(0.0).build().is_err());
        assert!(HistogramFacet::new("r").interval(-5.0).build().is_err());
        assert!(HistogramFacet::new("r").interval(f64::NAN).build().is_err());
        assert!(HistogramFacet::new("r").time_interval("soon").build().is_err());
        assert!(HistogramFacet::new("r").time_interval("1.5h").build().is_ok());
        assert!(HistogramFacet::new("r").time_interval("250ms").build().is_ok());
    }
}
