use serde::Deserialize;

use metaweave_model::MediaType;

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbMovieResult {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbShowResult {
    pub id: u64,
    #[serde(default)]
    pub name: String, // TV shows use "name" instead of "title"
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
}

/// One row of a type-restricted search.
#[derive(Debug, Clone, PartialEq)]
pub enum TmdbSearchItem {
    Movie(TmdbMovieResult),
    Show(TmdbShowResult),
}

impl TmdbSearchItem {
    pub fn id(&self) -> u64 {
        match self {
            TmdbSearchItem::Movie(movie) => movie.id,
            TmdbSearchItem::Show(show) => show.id,
        }
    }

    pub fn media_type(&self) -> MediaType {
        match self {
            TmdbSearchItem::Movie(_) => MediaType::Movie,
            TmdbSearchItem::Show(_) => MediaType::Series,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbMovieData {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    pub release_date: Option<String>,
    pub imdb_id: Option<String>,
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbShowData {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub seasons: Vec<TmdbSeasonShort>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbSeasonShort {
    pub id: u64,
    pub season_number: u32,
    #[serde(default)]
    pub name: String,
}

/// Detail payload, discriminated by the media type it was requested as.
#[derive(Debug, Clone, PartialEq)]
pub enum TmdbDetails {
    Movie(TmdbMovieData),
    Show(TmdbShowData),
}

impl TmdbDetails {
    pub fn id(&self) -> u64 {
        match self {
            TmdbDetails::Movie(movie) => movie.id,
            TmdbDetails::Show(show) => show.id,
        }
    }

    pub fn media_type(&self) -> MediaType {
        match self {
            TmdbDetails::Movie(_) => MediaType::Movie,
            TmdbDetails::Show(_) => MediaType::Series,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TmdbExternalIds {
    pub imdb_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TmdbSeason {
    #[serde(default)]
    pub episodes: Vec<TmdbEpisode>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TmdbEpisode {
    pub id: u64,
    pub episode_number: u32,
    #[serde(default)]
    pub name: String,
}

/// Episode listing entry as exposed by [`super::TmdbClient::get_season_episodes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmdbEpisodeShort {
    pub id: u64,
    pub episode_number: u32,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TmdbFindResult {
    #[serde(default)]
    pub movie_results: Vec<TmdbFindMovie>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TmdbFindMovie {
    pub id: u64,
}
