pub mod justwatch;
pub mod tmdb;

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

use crate::error::{MetadataError, Result};
use crate::transport::{ApiRequest, HttpTransport, TransportError};

pub use justwatch::{ExternalIdFamily, JustWatchClient, LegacyDetail};
pub use tmdb::TmdbClient;

/// Upstream services this crate talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Tmdb,
    JustWatch,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Tmdb => write!(f, "TMDB"),
            Provider::JustWatch => write!(f, "JustWatch"),
        }
    }
}

pub(crate) fn decode<T: DeserializeOwned>(provider: Provider, path: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| MetadataError::Decode {
        provider,
        path: path.to_string(),
        source,
    })
}

/// Fetch and decode, mapping the listed statuses to `None`.
pub(crate) async fn fetch_optional<T: DeserializeOwned>(
    transport: &dyn HttpTransport,
    provider: Provider,
    request: ApiRequest,
    absent_statuses: &[u16],
) -> Result<Option<T>> {
    let path = request.path.clone();
    match transport.get_json(request).await {
        Ok(value) => decode(provider, &path, value).map(Some),
        Err(TransportError::Status { status_code, .. }) if absent_statuses.contains(&status_code) => {
            tracing::debug!("{} has no record at {} (status {})", provider, path, status_code);
            Ok(None)
        }
        Err(err) => Err(MetadataError::from_transport(provider, err)),
    }
}

pub(crate) async fn fetch<T: DeserializeOwned>(
    transport: &dyn HttpTransport,
    provider: Provider,
    request: ApiRequest,
) -> Result<T> {
    let path = request.path.clone();
    let value = transport
        .get_json(request)
        .await
        .map_err(|err| MetadataError::from_transport(provider, err))?;
    decode(provider, &path, value)
}

/// Provider ids arrive as numbers from some endpoints and strings from
/// others; both land as `String`.
pub(crate) mod id_string {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        })
    }
}

/// Empty strings from upstream mean "no value".
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
