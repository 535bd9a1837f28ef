//! Optionally-bounded numeric intervals used by range facets

use serde::{Deserialize, Serialize};
use std::fmt;

/// One range facet boundary entry.
///
/// A missing `from` is open below, a missing `to` is open above. Missing
/// bounds are left out of the wire form entirely, never sent as `null`.
/// `from < to` is not checked here; the server decides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct RangeBoundary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<f64>,
}

impl RangeBoundary {
    pub fn new(from: Option<f64>, to: Option<f64>) -> Self {
        Self { from, to }
    }

    /// Everything below `to`
    pub fn less_than(to: f64) -> Self {
        Self {
            from: None,
            to: Some(to),
        }
    }

    /// Everything from `from` upwards
    pub fn greater_than(from: f64) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    pub fn between(from: f64, to: f64) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

impl fmt::Display for RangeBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.from, self.to) {
            (Some(from), Some(to)) => write!(f, "[{} TO {})", from, to),
            (Some(from), None) => write!(f, "[{} TO *]", from),
            (None, Some(to)) => write!(f, "[* TO {})", to),
            (None, None) => write!(f, "[* TO *]"),
        }
    }
}
