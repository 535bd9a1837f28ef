use super::{check_field, parse_order, FacetBuilder, FacetKind, FacetScope, FacetSpec, TermsOrder};
use crate::Result;
use serde::Serialize;

/// Compiled `terms` facet body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermsSpec {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<TermsOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_terms: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

/// Most frequent terms of a field
#[derive(Debug, Clone, Default)]
pub struct TermsFacet {
    field: String,
    size: Option<usize>,
    order: Option<String>,
    all_terms: Option<bool>,
    exclude: Vec<String>,
    scope: FacetScope,
}

impl TermsFacet {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }

    /// Number of buckets to return
    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// `count` or `term`; checked at build time
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Also return terms with a zero count
    pub fn all_terms(mut self, all_terms: bool) -> Self {
        self.all_terms = Some(all_terms);
        self
    }

    pub fn exclude<S: Into<String>>(mut self, terms: impl IntoIterator<Item = S>) -> Self {
        self.exclude.extend(terms.into_iter().map(Into::into));
        self
    }
}

impl FacetBuilder for TermsFacet {
    fn build(self) -> Result<FacetSpec> {
        check_field("terms", &self.field)?;
        let order = parse_order::<TermsOrder>(self.order.as_deref())?;

        Ok(FacetSpec::new(
            FacetKind::Terms(TermsSpec {
                field: self.field,
                size: self.size,
                order,
                all_terms: self.all_terms,
                exclude: self.exclude,
            }),
            self.scope,
        ))
    }

    fn scope_mut(&mut self) -> &mut FacetScope {
        &mut self.scope
    }
}
