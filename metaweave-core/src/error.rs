use metaweave_model::ModelError;
use thiserror::Error;

use crate::providers::Provider;
use crate::transport::TransportError;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("{provider} returned status {status_code}")]
    Upstream {
        provider: Provider,
        status_code: u16,
        body: String,
    },

    #[error("{provider} request failed: {message}")]
    Network { provider: Provider, message: String },

    #[error("failed to decode {provider} response for {path}: {source}")]
    Decode {
        provider: Provider,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported media type: {0}")]
    UnsupportedType(String),

    #[error("invalid canonical id: {0}")]
    InvalidCanonicalId(String),

    #[error("malformed legacy route: {0}")]
    InvalidLegacyRoute(String),
}

impl MetadataError {
    pub(crate) fn from_transport(provider: Provider, err: TransportError) -> Self {
        match err {
            TransportError::Status { status_code, body } => MetadataError::Upstream {
                provider,
                status_code,
                body,
            },
            TransportError::Network(message) | TransportError::InvalidJson(message) => {
                MetadataError::Network { provider, message }
            }
        }
    }

    /// Upstream HTTP status, if this error carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            MetadataError::Upstream { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

impl From<ModelError> for MetadataError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UnsupportedType(tag) => MetadataError::UnsupportedType(tag),
            ModelError::InvalidCanonicalId(raw) => MetadataError::InvalidCanonicalId(raw),
        }
    }
}

pub type Result<T> = std::result::Result<T, MetadataError>;
