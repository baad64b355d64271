//! The public lookup surface: search, detail by id, legacy detail by id.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use metaweave_config::Config;
use metaweave_model::{CanonicalId, DetailedMeta, MediaMeta, MediaType, SearchQuery};
use tracing::{debug, info, warn};

use crate::cache::TtlCache;
use crate::error::Result;
use crate::normalize::{
    format_legacy_title, format_tmdb_details, format_tmdb_search_result, format_tmdb_season,
    to_internal_meta,
};
use crate::poster::PosterResolver;
use crate::providers::justwatch::JustWatchClient;
use crate::providers::tmdb::{TmdbClient, TmdbDetails, TmdbSearchItem};
use crate::transport::{HttpTransport, ReqwestTransport, TransportError};

#[derive(Debug)]
pub struct Catalog {
    tmdb: TmdbClient,
    justwatch: JustWatchClient,
    posters: PosterResolver,
    search_cache: TtlCache<SearchQuery, Vec<MediaMeta>>,
    search_ttl: Duration,
    verify_posters: bool,
}

impl Catalog {
    pub fn new(transport: Arc<dyn HttpTransport>, config: &Config) -> Self {
        Self {
            tmdb: TmdbClient::new(Arc::clone(&transport), &config.tmdb),
            justwatch: JustWatchClient::new(Arc::clone(&transport), &config.justwatch),
            posters: PosterResolver::new(transport, &config.poster),
            search_cache: TtlCache::with_comparator(SearchQuery::same_search),
            search_ttl: config.cache.search_ttl,
            verify_posters: config.poster.verify,
        }
    }

    /// Catalog over a reqwest client built from the HTTP settings.
    pub fn from_config(config: &Config) -> std::result::Result<Self, TransportError> {
        let transport = ReqwestTransport::from_config(&config.http)?;
        Ok(Self::new(Arc::new(transport), config))
    }

    pub fn tmdb(&self) -> &TmdbClient {
        &self.tmdb
    }

    pub fn justwatch(&self) -> &JustWatchClient {
        &self.justwatch
    }

    pub fn posters(&self) -> &PosterResolver {
        &self.posters
    }

    pub fn search_cache(&self) -> &TtlCache<SearchQuery, Vec<MediaMeta>> {
        &self.search_cache
    }

    async fn poster_for(&self, identifier: &str, imdb_id: Option<&str>) -> Option<String> {
        if self.verify_posters {
            self.posters.resolve_poster_checked(identifier, imdb_id).await
        } else {
            Some(self.posters.resolve_poster(identifier, imdb_id))
        }
    }

    /// IMDB id of a search hit. Lookup failures only cost the poster.
    async fn search_hit_imdb_id(&self, id: &str, media_type: MediaType) -> Option<String> {
        let lookup = match media_type {
            MediaType::Movie => self.tmdb.get_details(id, media_type).await.map(|details| match details {
                Some(TmdbDetails::Movie(movie)) => movie.imdb_id,
                _ => None,
            }),
            MediaType::Series => self
                .tmdb
                .get_external_ids(id, media_type)
                .await
                .map(|ids| ids.imdb_id),
        };

        lookup.unwrap_or_else(|err| {
            warn!("IMDB lookup for {} {} failed: {}", media_type.tag(), id, err);
            None
        })
    }

    async fn search_entry(&self, item: &TmdbSearchItem, media_type: MediaType) -> Result<MediaMeta> {
        let id = item.id().to_string();
        let canonical = CanonicalId::new(media_type, id.as_str()).to_string();

        let imdb_id = self.search_hit_imdb_id(&id, media_type).await;
        let poster = self.poster_for(&canonical, imdb_id.as_deref()).await;

        let record = format_tmdb_search_result(item, media_type, poster)?;
        Ok(to_internal_meta(record, None))
    }

    /// Search one media type. Results are cached per (type, trimmed text).
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<MediaMeta>> {
        let text = query.trimmed();
        if text.is_empty() {
            debug!("Blank search query; skipping lookup");
            return Ok(Vec::new());
        }

        if let Some(cached) = self.search_cache.get(query) {
            debug!("Search cache HIT for {:?}", text);
            return Ok(cached);
        }
        debug!("Search cache MISS for {:?}", text);

        let items = self.tmdb.search(text, query.media_type).await?;
        let results = join_all(items.iter().map(|item| self.search_entry(item, query.media_type)))
            .await
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        info!("Search {:?} ({}) produced {} results", text, query.media_type, results.len());
        self.search_cache.set(query.clone(), results.clone(), self.search_ttl);
        Ok(results)
    }

    /// Full record from the primary catalog. For series, one season is
    /// attached: `season_id` when it matches, else season number 1.
    pub async fn get_by_id(
        &self,
        media_type: MediaType,
        id: &str,
        season_id: Option<&str>,
    ) -> Result<Option<DetailedMeta>> {
        let Some(details) = self.tmdb.get_details(id, media_type).await? else {
            debug!("No {} with id {}", media_type.tag(), id);
            return Ok(None);
        };

        let external_ids = self.tmdb.get_external_ids(id, media_type).await?;
        let imdb_id = external_ids.imdb_id;

        let season_data = match &details {
            TmdbDetails::Show(show) => {
                let selected = season_id
                    .and_then(|wanted| show.seasons.iter().find(|s| s.id.to_string() == wanted))
                    .or_else(|| show.seasons.iter().find(|s| s.season_number == 1));

                match selected {
                    Some(season) => {
                        let episodes = self
                            .tmdb
                            .get_season_episodes(&show.id.to_string(), season.season_number)
                            .await?;
                        Some(format_tmdb_season(season, episodes))
                    }
                    None => None,
                }
            }
            TmdbDetails::Movie(_) => None,
        };

        let canonical = CanonicalId::new(media_type, details.id().to_string()).to_string();
        let poster = self.poster_for(&canonical, imdb_id.as_deref()).await;
        let record = format_tmdb_details(&details, media_type, poster)?;

        Ok(Some(DetailedMeta {
            meta: to_internal_meta(record, season_data),
            imdb_id,
            tmdb_id: Some(id.to_string()),
        }))
    }

    /// [`get_by_id`](Self::get_by_id) addressed by a canonical id string.
    pub async fn get_by_canonical_id(&self, raw: &str, season_id: Option<&str>) -> Result<Option<DetailedMeta>> {
        let canonical: CanonicalId = raw.parse()?;
        self.get_by_id(canonical.media_type, &canonical.id, season_id).await
    }

    /// Record from the legacy catalog, with the identifiers that bridge it
    /// into the primary one.
    pub async fn get_legacy_by_id(
        &self,
        media_type: MediaType,
        id: &str,
        season_id: Option<&str>,
    ) -> Result<Option<DetailedMeta>> {
        let Some(detail) = self.justwatch.get_detailed_meta(media_type, id, season_id).await? else {
            debug!("No legacy {} with id {}", media_type.tag(), id);
            return Ok(None);
        };

        let meta = format_legacy_title(&detail);
        Ok(Some(DetailedMeta {
            meta,
            imdb_id: detail.external_ids.imdb_id,
            tmdb_id: detail.external_ids.tmdb_id,
        }))
    }
}
