//! # metaweave core
//!
//! Aggregates movie and series metadata from a primary catalog (TMDB) and a
//! legacy catalog (JustWatch) into the shared [`MediaMeta`] shape.
//!
//! - [`providers`]: typed clients for both catalogs, behind the
//!   [`HttpTransport`] seam
//! - [`poster`]: memoized poster URLs with API key rotation
//! - [`normalize`]: provider records to [`MediaMeta`]
//! - [`cache`]: TTL cache used for search results
//! - [`catalog`]: search and detail lookups
//! - [`legacy_route`]: legacy route migration
//!
//! ```no_run
//! use metaweave_core::{Catalog, MediaType, SearchQuery};
//!
//! async fn run(config: &metaweave_config::Config) -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Catalog::from_config(config)?;
//!     let hits = catalog
//!         .search(&SearchQuery::new("Blade Runner", MediaType::Movie))
//!         .await?;
//!     for hit in hits {
//!         println!("{} ({:?})", hit.title, hit.year);
//!     }
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]

pub mod cache;
pub mod catalog;
pub mod error;
pub mod legacy_route;
pub mod normalize;
pub mod poster;
pub mod providers;
pub mod transport;

pub use cache::TtlCache;
pub use catalog::Catalog;
pub use error::{MetadataError, Result};
pub use legacy_route::{LEGACY_ROUTE_PREFIX, LegacyRoute, is_legacy_route, parse_legacy_route};
pub use poster::{PosterKey, PosterKeyPool, PosterResolver};
pub use providers::{ExternalIdFamily, JustWatchClient, LegacyDetail, Provider, TmdbClient};
pub use transport::{ApiRequest, HttpTransport, ReqwestTransport, TransportError};

pub use metaweave_model::{
    CanonicalId, DetailedMeta, EpisodeMeta, ExternalIds, MediaKind, MediaMeta, MediaType,
    ModelError, SearchQuery, SeasonDetail, SeasonMeta, decode_canonical_id, encode_canonical_id,
};
