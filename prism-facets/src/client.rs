//! Faceted search over a [`Transport`]

use crate::query::Query;
use crate::request::SearchSource;
use crate::response::SearchResult;
use crate::spec::{FacetBuilder, FacetSpec};
use crate::transport::Transport;
use crate::Result;
use std::time::Instant;

/// One faceted search.
///
/// Facet registration fails immediately on a bad spec or a duplicate name,
/// so nothing is sent for an invalid request.
pub struct SearchService<'t, T: Transport + ?Sized> {
    transport: &'t T,
    index: Option<String>,
    source: SearchSource,
}

impl<'t, T: Transport + ?Sized> SearchService<'t, T> {
    pub fn new(transport: &'t T) -> Self {
        Self {
            transport,
            index: None,
            source: SearchSource::new(),
        }
    }

    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn query(mut self, query: Query) -> Self {
        self.source = self.source.query(query);
        self
    }

    pub fn size(mut self, size: usize) -> Self {
        self.source = self.source.size(size);
        self
    }

    pub fn facet(mut self, name: impl Into<String>, builder: impl FacetBuilder) -> Result<Self> {
        self.source.facets_mut().add(name, builder)?;
        Ok(self)
    }

    pub fn add_facet(mut self, name: impl Into<String>, spec: FacetSpec) -> Result<Self> {
        self.source.facets_mut().add_facet(name, spec)?;
        Ok(self)
    }

    /// Replace the whole request body
    pub fn source(mut self, source: SearchSource) -> Self {
        self.source = source;
        self
    }

    pub fn body(&self) -> &SearchSource {
        &self.source
    }

    pub async fn execute(self) -> Result<SearchResult> {
        let body = self.source.to_value();
        let start = Instant::now();

        let raw = self
            .transport
            .search(self.index.as_deref(), &body)
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    transport = self.transport.name(),
                    error_type = e.error_type(),
                    "search request failed: {}",
                    e
                )
            })?;
        let result = SearchResult::from_value(raw)?;

        tracing::info!(
            transport = self.transport.name(),
            index = self.index.as_deref().unwrap_or("_all"),
            hits = result.total_hits(),
            facets = result.facets.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search completed"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FacetError;
    use crate::spec::TermsFacet;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingTransport {
        calls: AtomicUsize,
        response: Value,
    }

    #[async_trait]
    impl Transport for CountingTransport {
        async fn search(&self, _index: Option<&str>, _body: &Value) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    fn transport(response: Value) -> CountingTransport {
        CountingTransport {
            calls: AtomicUsize::new(0),
            response,
        }
    }

    #[test]
    fn test_duplicate_fails_before_send() {
        let t = transport(json!({}));
        let result = SearchService::new(&t)
            .facet("user", TermsFacet::new("user"))
            .and_then(|s| s.facet("user", TermsFacet::new("user")));
        assert!(matches!(result, Err(FacetError::DuplicateFacetName(_))));
        assert_eq!(t.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_execute_decodes_facets() {
        let t = transport(json!({
            "took": 2,
            "timed_out": false,
            "hits": {"total": 3, "hits": []},
            "facets": {"user": {"_type": "terms", "total": 3, "terms": [
                {"term": "olivere", "count": 2}, {"term": "sandrae", "count": 1}
            ]}}
        }));
        let result = SearchService::new(&t)
            .index("twitter")
            .query(Query::match_all())
            .facet("user", TermsFacet::new("user").size(10))
            .unwrap()
            .execute()
            .await
            .unwrap();
        assert_eq!(t.calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.facets.terms("user").unwrap().terms.len(), 2);
    }

    #[tokio::test]
    async fn test_execute_surfaces_decode_failure() {
        let t = transport(json!({"facets": {"user": {"total": 3}}}));
        let err = SearchService::new(&t).execute().await.unwrap_err();
        assert!(matches!(err, FacetError::MalformedFacetPayload { .. }));
    }
}
