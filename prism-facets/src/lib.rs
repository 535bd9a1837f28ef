//! Faceted search for Elasticsearch-style search engines
//!
//! This crate builds the `facets` section of a search request and decodes
//! the `facets` section of the response into typed results.
//!
//! # Request side
//!
//! Facet builders compile into immutable [`FacetSpec`]s. A [`FacetRequest`]
//! holds them under unique names and renders them in registration order:
//!
//! - `terms` - most frequent values of a field
//! - `range` - counts per numeric interval
//! - `histogram` - fixed-width buckets (numeric or duration interval)
//! - `date_histogram` - calendar buckets, optionally with key/value statistics
//! - `query` / `filter` - count of documents matching a query
//! - `statistical` / `terms_stats` - numeric statistics
//!
//! # Response side
//!
//! [`FacetDecoder`] dispatches every payload on its `_type` discriminator.
//! Unrecognized discriminators decode to [`Facet::Unknown`]; a malformed
//! payload for a known discriminator fails the whole response.
//!
//! ```no_run
//! use prism_facets::{HttpTransport, Query, RangeFacet, SearchService, TermsFacet};
//! use prism_facets::config::ServerConfig;
//!
//! # async fn run() -> prism_facets::Result<()> {
//! let transport = HttpTransport::from_config(&ServerConfig::default())?;
//! let result = SearchService::new(&transport)
//!     .index("twitter")
//!     .query(Query::match_all())
//!     .facet("user", TermsFacet::new("user").size(10))?
//!     .facet("retweets", RangeFacet::new("retweets").less_than(10.0).greater_than(100.0))?
//!     .execute()
//!     .await?;
//!
//! if let Some(terms) = result.facets.terms("user") {
//!     for entry in &terms.terms {
//!         println!("{} {}", entry.term, entry.count);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod range;
pub mod request;
pub mod response;
pub mod spec;
pub mod transport;

pub use client::SearchService;
pub use error::FacetError;
pub use query::Query;
pub use range::RangeBoundary;
pub use request::{FacetRequest, SearchSource};
pub use response::{BucketKey, Facet, FacetDecoder, Facets, SearchResult};
pub use spec::{
    DateHistogramFacet, FacetBuilder, FacetSpec, FilterFacet, HistogramFacet, QueryFacet,
    RangeFacet, StatisticalFacet, TermsFacet, TermsStatsFacet,
};
pub use transport::{HttpTransport, Transport};

/// Result type for facet operations
pub type Result<T> = std::result::Result<T, FacetError>;
