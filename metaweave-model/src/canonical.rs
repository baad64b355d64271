//! Canonical identifiers: `tmdb-{movie|show}-{numericId}`.
//!
//! These are the ids the rest of the application routes on (`/media/<id>`),
//! always in the primary provider's namespace.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::ModelError;
use crate::media_type::MediaType;
use crate::meta::MediaMeta;

const NAMESPACE: &str = "tmdb";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanonicalId {
    pub media_type: MediaType,
    pub id: String,
}

impl CanonicalId {
    pub fn new(media_type: MediaType, id: impl Into<String>) -> Self {
        Self {
            media_type,
            id: id.into(),
        }
    }

    /// Application route for this id, e.g. `/media/tmdb-movie-603`.
    pub fn route(&self) -> String {
        format!("/media/{self}")
    }
}

impl Display for CanonicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{NAMESPACE}-{}-{}", self.media_type.tag(), self.id)
    }
}

impl FromStr for CanonicalId {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidCanonicalId(raw.to_string());

        let mut parts = raw.splitn(3, '-');
        let (Some(prefix), Some(tag), Some(id)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        if prefix != NAMESPACE {
            return Err(invalid());
        }
        let media_type = MediaType::from_tag(tag).map_err(|_| invalid())?;
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        Ok(CanonicalId::new(media_type, id))
    }
}

pub fn encode_canonical_id(meta: &MediaMeta) -> String {
    CanonicalId::new(meta.media_type(), meta.id.clone()).to_string()
}

pub fn decode_canonical_id(raw: &str) -> Result<CanonicalId, ModelError> {
    raw.parse()
}
