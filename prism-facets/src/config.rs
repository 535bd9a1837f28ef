//! Configuration for facet searches
//!
//! Default config location: ./facets.toml
//!
//! ```toml
//! [server]
//! url = "http://localhost:9200"
//!
//! [search]
//! index = "twitter"
//! query = { match_all = {} }
//!
//! [[facets]]
//! name = "user"
//! kind = "terms"
//! field = "user"
//! size = 10
//! order = "count"
//! ```

use crate::error::FacetError;
use crate::query::Query;
use crate::range::RangeBoundary;
use crate::request::SearchSource;
use crate::spec::{
    DateHistogramFacet, FacetBuilder, FacetSpec, FilterFacet, HistogramFacet, QueryFacet,
    RangeFacet, StatisticalFacet, TermsFacet, TermsStatsFacet,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facets: Vec<FacetDefinition>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_url")]
    pub url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Index to search; all indices when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter directive; RUST_LOG takes precedence
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// One `[[facets]]` table
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FacetDefinition {
    pub name: String,
    #[serde(flatten)]
    pub facet: FacetConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facet_filter: Option<Query>,
}

/// Facet body, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FacetConfig {
    Terms {
        field: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        order: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        all_terms: Option<bool>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        exclude: Vec<String>,
    },
    Range {
        field: String,
        #[serde(default)]
        ranges: Vec<RangeBoundary>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key_field: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value_field: Option<String>,
    },
    Histogram {
        field: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        interval: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time_interval: Option<String>,
    },
    DateHistogram {
        field: String,
        interval: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key_field: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value_field: Option<String>,
    },
    Query {
        query: Query,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        order: Option<String>,
    },
    Filter {
        filter: Query,
    },
    Statistical {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        field: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fields: Option<Vec<String>>,
    },
    TermsStats {
        key_field: String,
        value_field: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        order: Option<String>,
    },
}

impl FacetDefinition {
    /// Compile through the same builders library callers use
    pub fn to_spec(&self) -> crate::Result<FacetSpec> {
        let spec = self.facet.to_spec()?;
        let mut spec = match self.global {
            Some(global) => spec.global(global),
            None => spec,
        };
        if let Some(filter) = &self.facet_filter {
            spec = spec.facet_filter(filter.clone());
        }
        Ok(spec)
    }
}

impl FacetConfig {
    fn to_spec(&self) -> crate::Result<FacetSpec> {
        match self.clone() {
            FacetConfig::Terms {
                field,
                size,
                order,
                all_terms,
                exclude,
            } => {
                let mut b = TermsFacet::new(field).exclude(exclude);
                if let Some(size) = size {
                    b = b.size(size);
                }
                if let Some(order) = order {
                    b = b.order(order);
                }
                if let Some(all_terms) = all_terms {
                    b = b.all_terms(all_terms);
                }
                b.build()
            }
            FacetConfig::Range {
                field,
                ranges,
                key_field,
                value_field,
            } => {
                let mut b = ranges
                    .into_iter()
                    .fold(RangeFacet::new(field), RangeFacet::add_range);
                if let Some(key_field) = key_field {
                    b = b.key_field(key_field);
                }
                if let Some(value_field) = value_field {
                    b = b.value_field(value_field);
                }
                b.build()
            }
            FacetConfig::Histogram {
                field,
                interval,
                time_interval,
            } => match (interval, time_interval) {
                (Some(_), Some(_)) => Err(FacetError::config(format!(
                    "histogram facet on '{}' sets both interval and time_interval",
                    field
                ))),
                (Some(interval), None) => HistogramFacet::new(field).interval(interval).build(),
                (None, Some(duration)) => {
                    HistogramFacet::new(field).time_interval(duration).build()
                }
                (None, None) => HistogramFacet::new(field).build(),
            },
            FacetConfig::DateHistogram {
                field,
                interval,
                key_field,
                value_field,
            } => {
                let mut b = DateHistogramFacet::new(field).interval(interval);
                if let Some(key_field) = key_field {
                    b = b.key_field(key_field);
                }
                if let Some(value_field) = value_field {
                    b = b.value_field(value_field);
                }
                b.build()
            }
            FacetConfig::Query { query, order } => {
                let mut b = QueryFacet::new(query);
                if let Some(order) = order {
                    b = b.order(order);
                }
                b.build()
            }
            FacetConfig::Filter { filter } => FilterFacet::new(filter).build(),
            FacetConfig::Statistical { field, fields } => match (field, fields) {
                (Some(_), Some(_)) => Err(FacetError::config(
                    "statistical facet sets both field and fields",
                )),
                (Some(field), None) => StatisticalFacet::new().field(field).build(),
                (None, Some(fields)) => StatisticalFacet::new().fields(fields).build(),
                (None, None) => StatisticalFacet::new().build(),
            },
            FacetConfig::TermsStats {
                key_field,
                value_field,
                size,
                order,
            } => {
                let mut b = TermsStatsFacet::new(key_field, value_field);
                if let Some(size) = size {
                    b = b.size(size);
                }
                if let Some(order) = order {
                    b = b.order(order);
                }
                b.build()
            }
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from file path, or create it from the example config
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Config::example();
            config.save(path)?;
            tracing::info!("Wrote example config to {}", path.display());
            Ok(config)
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Compile the search body: query, size and every facet in file order
    pub fn to_search_source(&self) -> crate::Result<SearchSource> {
        let mut source = SearchSource::new();
        if let Some(query) = &self.search.query {
            source = source.query(query.clone());
        }
        if let Some(size) = self.search.size {
            source = source.size(size);
        }
        for def in &self.facets {
            let spec = def.to_spec()?;
            source.facets_mut().add_facet(def.name.clone(), spec)?;
        }
        Ok(source)
    }

    /// Starter config with one facet of each common kind
    pub fn example() -> Self {
        Config {
            search: SearchConfig {
                index: Some("twitter".to_string()),
                query: Some(Query::match_all()),
                size: Some(0),
            },
            facets: vec![
                FacetDefinition {
                    name: "user".to_string(),
                    facet: FacetConfig::Terms {
                        field: "user".to_string(),
                        size: Some(10),
                        order: Some("count".to_string()),
                        all_terms: None,
                        exclude: Vec::new(),
                    },
                    global: None,
                    facet_filter: None,
                },
                FacetDefinition {
                    name: "retweets".to_string(),
                    facet: FacetConfig::Range {
                        field: "retweets".to_string(),
                        ranges: vec![
                            RangeBoundary::less_than(10.0),
                            RangeBoundary::between(10.0, 100.0),
                            RangeBoundary::greater_than(100.0),
                        ],
                        key_field: None,
                        value_field: None,
                    },
                    global: None,
                    facet_filter: None,
                },
                FacetDefinition {
                    name: "dateHisto".to_string(),
                    facet: FacetConfig::DateHistogram {
                        field: "created".to_string(),
                        interval: "year".to_string(),
                        key_field: None,
                        value_field: None,
                    },
                    global: None,
                    facet_filter: None,
                },
            ],
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.url, "http://localhost:9200");
        assert_eq!(config.server.timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.facets.is_empty());
    }

    #[test]
    fn test_parse_facets() {
        let config = Config::from_toml_str(
            r#"
[server]
url = "http://es:9200"

[logging]
format = "json"

[[facets]]
name = "retweetsHistogram"
kind = "histogram"
field = "retweets"
interval = 100

[[facets]]
name = "queryFacet"
kind = "query"
query = { term = { user = "olivere" } }
order = "term"
global = true
"#,
        )
        .unwrap();

        assert_eq!(config.server.url, "http://es:9200");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.facets.len(), 2);

        let source = config.to_search_source().unwrap();
        assert_eq!(
            source.to_value(),
            json!({"facets": {
                "retweetsHistogram": {"histogram": {"field": "retweets", "interval": 100.0}},
                "queryFacet": {"query": {"term": {"user": "olivere"}}, "global": true}
            }})
        );
    }

    #[test]
    fn test_conflicting_histogram_intervals() {
        let config = Config::from_toml_str(
            r#"
[[facets]]
name = "h"
kind = "histogram"
field = "retweets"
interval = 100
time_interval = "1m"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.to_search_source(),
            Err(FacetError::Configuration(_))
        ));
    }

    #[test]
    fn test_duplicate_names_in_config() {
        let config = Config::from_toml_str(
            r#"
[[facets]]
name = "user"
kind = "terms"
field = "user"

[[facets]]
name = "user"
kind = "terms"
field = "author"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.to_search_source(),
            Err(FacetError::DuplicateFacetName(_))
        ));
    }

    #[test]
    fn test_unknown_kind_rejected_at_parse() {
        let result = Config::from_toml_str(
            r#"
[[facets]]
name = "x"
kind = "geo_distance"
field = "pin"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_example_compiles() {
        let source = Config::example().to_search_source().unwrap();
        assert_eq!(
            source.facets().names().collect::<Vec<_>>(),
            vec!["user", "retweets", "dateHisto"]
        );
    }
}
