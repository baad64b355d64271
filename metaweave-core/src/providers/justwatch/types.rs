use serde::Deserialize;

use crate::providers::id_string;

/// Title record from `/content/titles/{type}/{id}/locale/{locale}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JwTitle {
    #[serde(with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub poster: Option<String>,
    pub original_release_year: Option<u16>,
    pub object_type: String,
    #[serde(default)]
    pub seasons: Vec<JwSeasonShort>,
    #[serde(default)]
    pub external_ids: Vec<JwExternalId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JwExternalId {
    pub provider: String,
    #[serde(with = "id_string")]
    pub external_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JwSeasonShort {
    #[serde(with = "id_string")]
    pub id: String,
    pub season_number: u32,
    #[serde(default)]
    pub title: String,
}

/// Season record from `/content/titles/show_season/{id}/locale/{locale}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JwSeasonMeta {
    #[serde(with = "id_string")]
    pub id: String,
    pub season_number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub episodes: Vec<JwEpisode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JwEpisode {
    #[serde(with = "id_string")]
    pub id: String,
    pub episode_number: u32,
    #[serde(default)]
    pub title: String,
}
