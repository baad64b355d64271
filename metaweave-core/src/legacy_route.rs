//! Rewrites bookmarked legacy routes (`/media/JW<n>-<type>-<id>`) to
//! canonical ones (`/media/tmdb-<type>-<id>`).

use metaweave_model::{CanonicalId, MediaType};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{MetadataError, Result};

pub const LEGACY_ROUTE_PREFIX: &str = "/media/JW";

pub fn is_legacy_route(url: &str) -> bool {
    url.starts_with(LEGACY_ROUTE_PREFIX)
}

/// The title a legacy route points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRoute {
    pub media_type: MediaType,
    pub id: String,
}

/// Parse the `JW<n>-<type>-<id>` segment. Anything after a third `-` is
/// ignored.
pub fn parse_legacy_route(url: &str) -> Result<LegacyRoute> {
    let invalid = || MetadataError::InvalidLegacyRoute(url.to_string());

    let segment = url.split('/').nth(2).ok_or_else(invalid)?;
    let mut parts = segment.split('-');
    let (Some(_), Some(tag), Some(id)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    if id.is_empty() {
        return Err(invalid());
    }

    Ok(LegacyRoute {
        media_type: MediaType::from_tag(tag)?,
        id: id.to_string(),
    })
}

impl Catalog {
    /// Canonical route for a legacy one, or `None` when the URL is not a
    /// legacy route or its title cannot be bridged.
    ///
    /// Movies are matched through their IMDB id first; otherwise the TMDB id
    /// the legacy catalog links to is used as is.
    pub async fn migrate_legacy_route(&self, url: &str) -> Result<Option<String>> {
        if !is_legacy_route(url) {
            return Ok(None);
        }

        let route = parse_legacy_route(url)?;
        let Some(detail) = self.get_legacy_by_id(route.media_type, &route.id, None).await? else {
            debug!("Legacy title for {} no longer exists", url);
            return Ok(None);
        };

        if let (MediaType::Movie, Some(imdb_id)) = (route.media_type, detail.imdb_id.as_deref())
            && let Some(movie_id) = self.tmdb().resolve_movie_by_external_id(imdb_id).await?
        {
            let target = CanonicalId::new(MediaType::Movie, movie_id).route();
            info!("Migrated {} to {}", url, target);
            return Ok(Some(target));
        }

        match detail.tmdb_id {
            Some(tmdb_id) => {
                let target = CanonicalId::new(route.media_type, tmdb_id).route();
                info!("Migrated {} to {}", url, target);
                Ok(Some(target))
            }
            None => {
                debug!("Legacy title for {} has no primary catalog link", url);
                Ok(None)
            }
        }
    }
}
