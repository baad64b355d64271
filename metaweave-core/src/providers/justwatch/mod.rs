//! Legacy catalog client (JustWatch content API).
//!
//! Only used to resolve records that were bookmarked under the legacy
//! identifier scheme. The API is unauthenticated; 400 and 404 both mean the
//! title is gone. A missing season of a live title is an upstream error.

mod types;

pub use types::{JwEpisode, JwExternalId, JwSeasonMeta, JwSeasonShort, JwTitle};

use std::sync::Arc;

use metaweave_config::JustWatchConfig;
use metaweave_model::{ExternalIds, MediaType};
use tracing::debug;

use super::{Provider, fetch, fetch_optional, non_empty};
use crate::error::Result;
use crate::transport::{ApiRequest, HttpTransport};

const ABSENT: &[u16] = &[400, 404];
const POSTER_PROFILE: &str = "s166";

/// External id namespaces the legacy catalog links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalIdFamily {
    Imdb,
    Tmdb,
}

impl ExternalIdFamily {
    /// Provider tags in lookup order, most specific first.
    fn tags(self) -> [&'static str; 2] {
        match self {
            ExternalIdFamily::Imdb => ["imdb_latest", "imdb"],
            ExternalIdFamily::Tmdb => ["tmdb_latest", "tmdb"],
        }
    }
}

/// Pick the id for `family`, preferring the `_latest` tag over the plain one.
pub fn preferred_external_id(ids: &[JwExternalId], family: ExternalIdFamily) -> Option<String> {
    family.tags().into_iter().find_map(|tag| {
        ids.iter()
            .filter(|id| id.provider == tag)
            .find_map(|id| non_empty(Some(id.external_id.clone())))
    })
}

/// A legacy title with its season (shows only) and resolved external ids.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyDetail {
    pub media_type: MediaType,
    pub title: JwTitle,
    pub season: Option<JwSeasonMeta>,
    pub external_ids: ExternalIds,
}

#[derive(Debug, Clone)]
pub struct JustWatchClient {
    transport: Arc<dyn HttpTransport>,
    api_base: String,
    image_base: String,
    locale: String,
}

impl JustWatchClient {
    pub fn new(transport: Arc<dyn HttpTransport>, config: &JustWatchConfig) -> Self {
        Self {
            transport,
            api_base: config.api_base.clone(),
            image_base: config.image_base.clone(),
            locale: config.locale.clone(),
        }
    }

    fn request(&self, path: String) -> ApiRequest {
        ApiRequest::new(&self.api_base, path)
    }

    /// Expand a `{profile}` poster path into an absolute image URL.
    pub fn poster_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.image_base.trim_end_matches('/'),
            path.replace("{profile}", POSTER_PROFILE).trim_start_matches('/')
        )
    }

    /// Look up a legacy title. For shows, one season is fetched as well:
    /// `season_id` when given, else the first season listed on the title.
    pub async fn get_detailed_meta(
        &self,
        media_type: MediaType,
        id: &str,
        season_id: Option<&str>,
    ) -> Result<Option<LegacyDetail>> {
        let path = format!(
            "content/titles/{}/{}/locale/{}",
            media_type.tag(),
            urlencoding::encode(id),
            urlencoding::encode(&self.locale)
        );
        let Some(mut title) =
            fetch_optional::<JwTitle>(self.transport.as_ref(), Provider::JustWatch, self.request(path), ABSENT)
                .await?
        else {
            return Ok(None);
        };

        let title_type = MediaType::from_tag(&title.object_type)?;
        title.poster = non_empty(title.poster.take()).map(|p| self.poster_url(&p));

        let external_ids = ExternalIds {
            imdb_id: preferred_external_id(&title.external_ids, ExternalIdFamily::Imdb),
            tmdb_id: preferred_external_id(&title.external_ids, ExternalIdFamily::Tmdb),
        };
        debug!(
            "JustWatch {} {} links to imdb={:?} tmdb={:?}",
            title_type.tag(),
            title.id,
            external_ids.imdb_id,
            external_ids.tmdb_id
        );

        let season = if title_type.is_series() {
            let target = season_id
                .map(str::to_string)
                .or_else(|| title.seasons.first().map(|s| s.id.clone()));
            match target {
                Some(season_id) => Some(self.get_season(&season_id).await?),
                None => None,
            }
        } else {
            None
        };

        Ok(Some(LegacyDetail {
            media_type: title_type,
            title,
            season,
            external_ids,
        }))
    }

    async fn get_season(&self, season_id: &str) -> Result<JwSeasonMeta> {
        let path = format!(
            "content/titles/show_season/{}/locale/{}",
            urlencoding::encode(season_id),
            urlencoding::encode(&self.locale)
        );
        fetch::<JwSeasonMeta>(self.transport.as_ref(), Provider::JustWatch, self.request(path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ext(provider: &str, id: &str) -> JwExternalId {
        JwExternalId {
            provider: provider.into(),
            external_id: id.into(),
        }
    }

    #[test]
    fn latest_tag_wins_over_plain() {
        let ids = vec![ext("imdb", "tt-old"), ext("tmdb", "11"), ext("imdb_latest", "tt-new")];
        assert_eq!(
            preferred_external_id(&ids, ExternalIdFamily::Imdb).as_deref(),
            Some("tt-new")
        );
        assert_eq!(preferred_external_id(&ids, ExternalIdFamily::Tmdb).as_deref(), Some("11"));
    }

    #[test]
    fn missing_family_is_none() {
        let ids = vec![ext("eidr", "10.5240/XXXX"), ext("tms", "MV000")];
        assert_eq!(preferred_external_id(&ids, ExternalIdFamily::Imdb), None);
        assert_eq!(preferred_external_id(&[], ExternalIdFamily::Tmdb), None);
    }
}
