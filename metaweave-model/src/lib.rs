//! Core data model definitions shared across metaweave crates.
#![allow(missing_docs)]

pub mod canonical;
pub mod error;
pub mod meta;
pub mod media_type;
pub mod query;

// Intentionally curated re-exports for downstream consumers.
pub use canonical::{
    CanonicalId, decode_canonical_id, encode_canonical_id,
};
pub use error::{ModelError, Result as ModelResult};
pub use media_type::MediaType;
pub use meta::{
    DetailedMeta, EpisodeMeta, ExternalIds, MediaKind, MediaMeta,
    SeasonDetail, SeasonMeta,
};
pub use query::SearchQuery;
