use super::{
    CountResult, DateHistogramResult, Facet, HistogramResult, RangeResult, StatisticalResult,
    TermsResult, TermsStatsResult,
};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Decoded facets of one response, by name.
///
/// Read-only once the decoder has built it. Looking up a name that was
/// never requested is a normal miss, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Facets {
    facets: HashMap<String, Facet>,
}

impl Facets {
    pub(crate) fn insert(&mut self, name: String, facet: Facet) {
        self.facets.insert(name, facet);
    }

    pub fn get(&self, name: &str) -> Option<&Facet> {
        self.facets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.facets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Names sorted, for stable output
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.facets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Facet)> {
        self.facets.iter().map(|(n, f)| (n.as_str(), f))
    }

    pub fn terms(&self, name: &str) -> Option<&TermsResult> {
        self.get(name).and_then(Facet::as_terms)
    }

    pub fn range(&self, name: &str) -> Option<&RangeResult> {
        self.get(name).and_then(Facet::as_range)
    }

    pub fn histogram(&self, name: &str) -> Option<&HistogramResult> {
        self.get(name).and_then(Facet::as_histogram)
    }

    pub fn date_histogram(&self, name: &str) -> Option<&DateHistogramResult> {
        self.get(name).and_then(Facet::as_date_histogram)
    }

    pub fn count(&self, name: &str) -> Option<&CountResult> {
        self.get(name).and_then(Facet::as_count)
    }

    pub fn statistical(&self, name: &str) -> Option<&StatisticalResult> {
        self.get(name).and_then(Facet::as_statistical)
    }

    pub fn terms_stats(&self, name: &str) -> Option<&TermsStatsResult> {
        self.get(name).and_then(Facet::as_terms_stats)
    }
}

impl Serialize for Facets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.facets.len()))?;
        for name in self.names() {
            map.serialize_entry(name, &self.facets[name])?;
        }
        map.end()
    }
}
