use super::{check_field, check_key_value_pair, FacetBuilder, FacetKind, FacetScope, FacetSpec};
use crate::error::FacetError;
use crate::Result;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Calendar-aligned bucket unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarInterval {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl CalendarInterval {
    pub const ALL: [CalendarInterval; 8] = [
        CalendarInterval::Year,
        CalendarInterval::Quarter,
        CalendarInterval::Month,
        CalendarInterval::Week,
        CalendarInterval::Day,
        CalendarInterval::Hour,
        CalendarInterval::Minute,
        CalendarInterval::Second,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarInterval::Year => "year",
            CalendarInterval::Quarter => "quarter",
            CalendarInterval::Month => "month",
            CalendarInterval::Week => "week",
            CalendarInterval::Day => "day",
            CalendarInterval::Hour => "hour",
            CalendarInterval::Minute => "minute",
            CalendarInterval::Second => "second",
        }
    }
}

impl FromStr for CalendarInterval {
    type Err = FacetError;

    fn from_str(s: &str) -> Result<Self> {
        CalendarInterval::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| {
                FacetError::config(format!(
                    "invalid calendar interval '{}', expected one of: year, quarter, month, week, day, hour, minute, second",
                    s
                ))
            })
    }
}

impl fmt::Display for CalendarInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiled `date_histogram` facet body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateHistogramSpec {
    pub field: String,
    pub interval: CalendarInterval,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_field: Option<String>,
}

impl DateHistogramSpec {
    /// Buckets will carry min/max/mean/total statistics
    pub fn has_value_stats(&self) -> bool {
        self.value_field.is_some()
    }
}

/// Calendar buckets over a date field.
///
/// With a key/value field pair every bucket also reports statistics over the
/// value field.
#[derive(Debug, Clone, Default)]
pub struct DateHistogramFacet {
    field: String,
    interval: Option<String>,
    key_field: Option<String>,
    value_field: Option<String>,
    scope: FacetScope,
}

impl DateHistogramFacet {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }

    /// Unit name such as `year` or `day`; checked at build time
    pub fn interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = Some(interval.into());
        self
    }

    pub fn calendar_interval(self, interval: CalendarInterval) -> Self {
        self.interval(interval.as_str())
    }

    pub fn key_field(mut self, key_field: impl Into<String>) -> Self {
        self.key_field = Some(key_field.into());
        self
    }

    pub fn value_field(mut self, value_field: impl Into<String>) -> Self {
        self.value_field = Some(value_field.into());
        self
    }
}

impl FacetBuilder for DateHistogramFacet {
    fn build(self) -> Result<FacetSpec> {
        check_field("date_histogram", &self.field)?;
        check_key_value_pair("date_histogram", &self.key_field, &self.value_field)?;
        let interval: CalendarInterval = self
            .interval
            .as_deref()
            .ok_or_else(|| {
                FacetError::config(format!(
                    "date_histogram facet on '{}' needs an interval",
                    self.field
                ))
            })?
            .parse()?;

        Ok(FacetSpec::new(
            FacetKind::DateHistogram(DateHistogramSpec {
                field: self.field,
                interval,
                key_field: self.key_field,
                value_field: self.value_field,
            }),
            self.scope,
        ))
    }

    fn scope_mut(&mut self) -> &mut FacetScope {
        &mut self.scope
    }
}
