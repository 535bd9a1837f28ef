use super::{parse_order, FacetBuilder, FacetKind, FacetScope, FacetSpec, TermsOrder};
use crate::query::Query;
use crate::Result;
use serde::Serialize;

/// Compiled `query` facet body; serializes as the wrapped query itself
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QuerySpec {
    pub query: Query,
    /// Validated, but not part of the wire form: the server reports a
    /// single count for query facets
    #[serde(skip)]
    pub order: Option<TermsOrder>,
}

/// Count of documents matching a wrapped query
#[derive(Debug, Clone)]
pub struct QueryFacet {
    query: Query,
    order: Option<String>,
    scope: FacetScope,
}

impl QueryFacet {
    pub fn new(query: Query) -> Self {
        Self {
            query,
            order: None,
            scope: FacetScope::default(),
        }
    }

    /// `count` or `term`; checked at build time
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }
}

impl FacetBuilder for QueryFacet {
    fn build(self) -> Result<FacetSpec> {
        let order = parse_order::<TermsOrder>(self.order.as_deref())?;
        Ok(FacetSpec::new(
            FacetKind::Query(QuerySpec {
                query: self.query,
                order,
            }),
            self.scope,
        ))
    }

    fn scope_mut(&mut self) -> &mut FacetScope {
        &mut self.scope
    }
}

/// Count of documents matching a filter
#[derive(Debug, Clone)]
pub struct FilterFacet {
    filter: Query,
    scope: FacetScope,
}

impl FilterFacet {
    pub fn new(filter: Query) -> Self {
        Self {
            filter,
            scope: FacetScope::default(),
        }
    }
}

impl FacetBuilder for FilterFacet {
    fn build(self) -> Result<FacetSpec> {
        Ok(FacetSpec::new(FacetKind::Filter(self.filter), self.scope))
    }

    fn scope_mut(&mut self) -> &mut FacetScope {
        &mut self.scope
    }
}
