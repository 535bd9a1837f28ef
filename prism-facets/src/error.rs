//! Error types for the facet layer

use thiserror::Error;

/// Facet layer errors
#[derive(Debug, Error)]
pub enum FacetError {
    /// Caller mistake detected while compiling a facet spec
    #[error("Invalid facet configuration: {0}")]
    Configuration(String),

    #[error("Duplicate facet name: {0}")]
    DuplicateFacetName(String),

    /// A facet payload in the response could not be decoded
    #[error("Malformed facet payload '{name}': {reason}")]
    MalformedFacetPayload { name: String, reason: String },

    #[error("Malformed search response: {0}")]
    MalformedResponse(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Search request failed (status {status}): {body}")]
    Http { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl FacetError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub(crate) fn malformed(name: &str, reason: impl Into<String>) -> Self {
        Self::MalformedFacetPayload {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable kind string, used in log fields and CLI output
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration_exception",
            Self::DuplicateFacetName(_) => "duplicate_facet_name",
            Self::MalformedFacetPayload { .. } => "malformed_facet_payload",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Transport(_) => "transport_exception",
            Self::Http { .. } => "search_phase_execution_exception",
            Self::Json(_) => "parse_exception",
            Self::InvalidUrl(_) => "invalid_url",
        }
    }

    /// True for errors raised before any request leaves the process
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::DuplicateFacetName(_))
    }
}
