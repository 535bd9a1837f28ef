//! Outgoing search request: named facets plus the search body around them

use crate::error::FacetError;
use crate::query::Query;
use crate::spec::{FacetBuilder, FacetSpec};
use crate::Result;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Named facet specs for one request.
///
/// Names are unique and keep their registration order in the wire form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetRequest {
    facets: Vec<(String, FacetSpec)>,
}

impl FacetRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a compiled spec under `name`
    pub fn add_facet(&mut self, name: impl Into<String>, spec: FacetSpec) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(FacetError::config("facet name must not be empty"));
        }
        if self.contains(&name) {
            return Err(FacetError::DuplicateFacetName(name));
        }
        tracing::debug!(facet = %name, kind = spec.kind_name(), "registered facet");
        self.facets.push((name, spec));
        Ok(())
    }

    /// Compile `builder` and register it under `name`
    pub fn add(&mut self, name: impl Into<String>, builder: impl FacetBuilder) -> Result<()> {
        self.add_facet(name, builder.build()?)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.facets.iter().any(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&FacetSpec> {
        self.facets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spec)| spec)
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.facets.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FacetSpec)> {
        self.facets.iter().map(|(n, spec)| (n.as_str(), spec))
    }

    /// The `facets` object of the request body
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .facets
            .iter()
            .map(|(name, spec)| (name.clone(), spec.to_value()))
            .collect();
        Value::Object(map)
    }
}

impl Serialize for FacetRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.facets.len()))?;
        for (name, spec) in &self.facets {
            map.serialize_entry(name, spec)?;
        }
        map.end()
    }
}

/// Search request body
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<Query>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<usize>,
    #[serde(skip_serializing_if = "FacetRequest::is_empty")]
    facets: FacetRequest,
}

impl SearchSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }

    /// Number of hits to return alongside the facets
    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn facet(mut self, name: impl Into<String>, builder: impl FacetBuilder) -> Result<Self> {
        self.facets.add(name, builder)?;
        Ok(self)
    }

    pub fn facets(&self) -> &FacetRequest {
        &self.facets
    }

    pub fn facets_mut(&mut self) -> &mut FacetRequest {
        &mut self.facets
    }

    pub fn to_value(&self) -> Value {
        let value = serde_json::to_value(self).unwrap_or(Value::Null);
        tracing::debug!(facets = self.facets.len(), "compiled search body");
        value
    }
}
