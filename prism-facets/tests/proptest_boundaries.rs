//! Property tests for range boundaries and facet ordering.

use prism_facets::range::RangeBoundary;
use prism_facets::{FacetBuilder, FacetRequest, RangeFacet, TermsFacet};
use proptest::prelude::*;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn bound() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(-1.0e9f64..1.0e9f64)
}

fn boundary() -> impl Strategy<Value = RangeBoundary> {
    (bound(), bound()).prop_map(|(from, to)| RangeBoundary::new(from, to))
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn absent_bounds_are_omitted_not_null(b in boundary()) {
        let value = serde_json::to_value(b).unwrap();
        let obj = value.as_object().unwrap();

        prop_assert_eq!(obj.contains_key("from"), b.from.is_some());
        prop_assert_eq!(obj.contains_key("to"), b.to.is_some());
        prop_assert!(obj.values().all(|v| !v.is_null()));

        let back: RangeBoundary = serde_json::from_value(value).unwrap();
        prop_assert_eq!(back, b);
    }

    #[test]
    fn range_facet_keeps_every_boundary_in_order(bs in prop::collection::vec(boundary(), 1..12)) {
        let spec = bs
            .iter()
            .copied()
            .fold(RangeFacet::new("retweets"), RangeFacet::add_range)
            .build()
            .unwrap();

        let value = spec.to_value();
        let ranges: Vec<RangeBoundary> =
            serde_json::from_value(value["range"]["ranges"].clone()).unwrap();
        prop_assert_eq!(ranges, bs);
    }

    #[test]
    fn facet_names_keep_registration_order(
        names in prop::collection::hash_set("[a-zA-Z][a-zA-Z0-9_]{0,15}", 1..20)
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let mut req = FacetRequest::new();
        for name in &names {
            req.add(name.clone(), TermsFacet::new("user")).unwrap();
        }

        let value = req.to_value();
        let wire: Vec<&String> = match &value {
            Value::Object(map) => map.keys().collect(),
            _ => Vec::new(),
        };
        prop_assert_eq!(wire, names.iter().collect::<Vec<_>>());
        prop_assert_eq!(req.names().collect::<Vec<_>>(), names.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
