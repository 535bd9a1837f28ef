//! Facet payload decoding

use super::{
    CountResult, DateHistogramResult, Facet, Facets, HistogramResult, RangeResult,
    StatisticalResult, TermsResult, TermsStatsResult, UnknownFacet,
};
use crate::error::FacetError;
use crate::Result;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Decodes the `facets` object of a search response
pub struct FacetDecoder;

impl FacetDecoder {
    /// Decode every named payload.
    ///
    /// All or nothing: the first malformed payload fails the whole call and
    /// no partial store is returned.
    pub fn decode_facets(raw: &Map<String, Value>) -> Result<Facets> {
        let mut facets = Facets::default();
        for (name, payload) in raw {
            let facet = Self::decode_facet(name, payload)?;
            facets.insert(name.clone(), facet);
        }
        tracing::debug!(count = facets.len(), "decoded facets");
        Ok(facets)
    }

    /// Like [`decode_facets`](Self::decode_facets), for an untyped value.
    /// `null` decodes to an empty store.
    pub fn decode_value(raw: &Value) -> Result<Facets> {
        match raw {
            Value::Null => Ok(Facets::default()),
            Value::Object(map) => Self::decode_facets(map),
            other => Err(FacetError::MalformedResponse(format!(
                "facets must be an object, got {}",
                json_kind(other)
            ))),
        }
    }

    /// Decode one payload by its `_type` discriminator
    pub fn decode_facet(name: &str, payload: &Value) -> Result<Facet> {
        let body = payload.as_object().ok_or_else(|| {
            FacetError::malformed(name, format!("expected object, got {}", json_kind(payload)))
        })?;

        let kind = match body.get("_type").or_else(|| body.get("type")) {
            Some(Value::String(kind)) => kind.as_str(),
            Some(other) => {
                return Err(FacetError::malformed(
                    name,
                    format!("_type must be a string, got {}", json_kind(other)),
                ))
            }
            None => return Err(FacetError::malformed(name, "missing _type")),
        };

        tracing::debug!(facet = %name, kind, "decoding facet");

        let facet = match kind {
            "terms" => Facet::Terms(parse::<TermsResult>(name, payload)?),
            "range" => Facet::Range(parse::<RangeResult>(name, payload)?),
            "histogram" => {
                let result = parse::<HistogramResult>(name, payload)?;
                warn_if_unordered(name, result.entries.iter().map(|e| e.key));
                Facet::Histogram(result)
            }
            "date_histogram" => {
                let result = parse::<DateHistogramResult>(name, payload)?;
                warn_if_unordered(name, result.entries.iter().map(|e| e.time as f64));
                Facet::DateHistogram(result)
            }
            "query" => Facet::Query(parse::<CountResult>(name, payload)?),
            "filter" => Facet::Filter(parse::<CountResult>(name, payload)?),
            "statistical" => Facet::Statistical(parse::<StatisticalResult>(name, payload)?),
            "terms_stats" => Facet::TermsStats(parse::<TermsStatsResult>(name, payload)?),
            other => {
                tracing::warn!(facet = %name, kind = other, "unrecognised facet type, keeping type and total only");
                Facet::Unknown(UnknownFacet {
                    kind: other.to_string(),
                    total: body.get("total").and_then(whole_count),
                })
            }
        };
        Ok(facet)
    }
}

fn parse<T: DeserializeOwned>(name: &str, payload: &Value) -> Result<T> {
    T::deserialize(payload).map_err(|e| FacetError::malformed(name, e.to_string()))
}

/// Entries are passed through as returned; only the server knows the
/// bucketing, so out-of-order input is reported and left alone.
fn warn_if_unordered(name: &str, keys: impl Iterator<Item = f64>) {
    let mut prev: Option<f64> = None;
    for key in keys {
        if let Some(p) = prev {
            if key < p {
                tracing::warn!(facet = %name, "histogram entries are not in ascending order");
                return;
            }
        }
        prev = Some(key);
    }
}

/// Counts sometimes arrive as whole floats such as `3.0`
fn whole_count(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|t| t.fract() == 0.0 && *t >= 0.0 && *t <= u64::MAX as f64)
            .map(|t| t as u64)
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
