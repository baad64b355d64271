//! Primary catalog client (TMDB v3, bearer-token auth).

mod types;

pub use types::{
    TmdbDetails, TmdbEpisodeShort, TmdbExternalIds, TmdbMovieData, TmdbMovieResult, TmdbPage,
    TmdbSearchItem, TmdbSeasonShort, TmdbShowData, TmdbShowResult,
};

use std::fmt;
use std::sync::Arc;

use metaweave_config::TmdbConfig;
use metaweave_model::MediaType;
use tracing::{debug, info};

use self::types::{TmdbFindResult, TmdbSeason};
use super::{Provider, fetch, fetch_optional, non_empty};
use crate::error::Result;
use crate::transport::{ApiRequest, HttpTransport};

const NOT_FOUND: &[u16] = &[404];

pub struct TmdbClient {
    transport: Arc<dyn HttpTransport>,
    api_base: String,
    read_token: String,
    language: String,
}

impl fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbClient")
            .field("transport", &self.transport)
            .field("api_base", &self.api_base)
            .field("read_token", &"<redacted>")
            .field("language", &self.language)
            .finish()
    }
}

impl TmdbClient {
    pub fn new(transport: Arc<dyn HttpTransport>, config: &TmdbConfig) -> Self {
        Self {
            transport,
            api_base: config.api_base.clone(),
            read_token: config.read_token.clone(),
            language: config.language.clone(),
        }
    }

    fn request(&self, path: String) -> ApiRequest {
        ApiRequest::new(&self.api_base, path)
            .header("accept", "application/json")
            .header("Authorization", format!("Bearer {}", self.read_token))
    }

    fn details_path(id: &str, media_type: MediaType) -> String {
        let id = urlencoding::encode(id);
        match media_type {
            MediaType::Movie => format!("movie/{id}"),
            MediaType::Series => format!("tv/{id}"),
        }
    }

    /// Search the first page of one media type, adult titles excluded.
    pub async fn search(&self, query: &str, media_type: MediaType) -> Result<Vec<TmdbSearchItem>> {
        info!("TMDB search for {:?} ({})", query, media_type);

        let endpoint = match media_type {
            MediaType::Movie => "search/movie",
            MediaType::Series => "search/tv",
        };
        let request = self
            .request(endpoint.to_string())
            .param("query", query)
            .param("include_adult", false)
            .param("language", &self.language)
            .param("page", 1);

        let items: Vec<TmdbSearchItem> = match media_type {
            MediaType::Movie => {
                let page: TmdbPage<TmdbMovieResult> =
                    fetch(self.transport.as_ref(), Provider::Tmdb, request).await?;
                page.results.into_iter().map(TmdbSearchItem::Movie).collect()
            }
            MediaType::Series => {
                let page: TmdbPage<TmdbShowResult> =
                    fetch(self.transport.as_ref(), Provider::Tmdb, request).await?;
                page.results.into_iter().map(TmdbSearchItem::Show).collect()
            }
        };

        info!("TMDB search returned {} results", items.len());
        Ok(items)
    }

    /// Full movie or show record; `None` when TMDB has no such id.
    pub async fn get_details(&self, id: &str, media_type: MediaType) -> Result<Option<TmdbDetails>> {
        let request = self.request(Self::details_path(id, media_type));
        let transport = self.transport.as_ref();

        let details = match media_type {
            MediaType::Movie => fetch_optional::<TmdbMovieData>(transport, Provider::Tmdb, request, NOT_FOUND)
                .await?
                .map(TmdbDetails::Movie),
            MediaType::Series => fetch_optional::<TmdbShowData>(transport, Provider::Tmdb, request, NOT_FOUND)
                .await?
                .map(TmdbDetails::Show),
        };
        Ok(details)
    }

    pub async fn get_external_ids(&self, id: &str, media_type: MediaType) -> Result<TmdbExternalIds> {
        let path = format!("{}/external_ids", Self::details_path(id, media_type));
        let mut ids: TmdbExternalIds = fetch(self.transport.as_ref(), Provider::Tmdb, self.request(path)).await?;
        ids.imdb_id = non_empty(ids.imdb_id);
        Ok(ids)
    }

    pub async fn get_season_episodes(&self, show_id: &str, season_number: u32) -> Result<Vec<TmdbEpisodeShort>> {
        let path = format!("tv/{}/season/{}", urlencoding::encode(show_id), season_number);
        let season: TmdbSeason = fetch(self.transport.as_ref(), Provider::Tmdb, self.request(path)).await?;

        Ok(season
            .episodes
            .into_iter()
            .map(|e| TmdbEpisodeShort {
                id: e.id,
                episode_number: e.episode_number,
                title: e.name,
            })
            .collect())
    }

    /// Bridge an IMDB id into TMDB's movie namespace.
    pub async fn resolve_movie_by_external_id(&self, imdb_id: &str) -> Result<Option<String>> {
        let path = format!("find/{}", urlencoding::encode(imdb_id));
        let request = self.request(path).param("external_source", "imdb_id");
        let found: TmdbFindResult = fetch(self.transport.as_ref(), Provider::Tmdb, request).await?;

        let movie_id = found.movie_results.first().map(|m| m.id.to_string());
        debug!("IMDB {} resolved to TMDB movie {:?}", imdb_id, movie_id);
        Ok(movie_id)
    }
}
