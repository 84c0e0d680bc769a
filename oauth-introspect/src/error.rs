use std::sync::Arc;
use thiserror::Error;

/// Errors raised while fetching a provider's metadata document
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to fetch metadata document: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Metadata endpoint answered with status {0}")]
    Status(u16),

    #[error("Failed to parse metadata document: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum IntrospectionError {
    /// Discovery failed; the introspection endpoint is unknown
    #[error("Provider metadata unavailable: {0}")]
    MetadataUnavailable(Arc<MetadataError>),

    /// The introspection endpoint answered with something other than 200
    #[error("Introspection rejected with status {status}")]
    Rejected {
        status: u16,
        content_type: Option<String>,
        body: Vec<u8>,
    },

    #[error("Introspection endpoint unreachable: {message}")]
    Unreachable { timed_out: bool, message: String },

    #[error("Invalid introspection response: {0}")]
    InvalidResponse(String),
}

impl IntrospectionError {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        Self::Unreachable {
            timed_out: err.is_timeout(),
            message: err.to_string(),
        }
    }
}

impl From<Arc<MetadataError>> for IntrospectionError {
    fn from(err: Arc<MetadataError>) -> Self {
        Self::MetadataUnavailable(err)
    }
}
