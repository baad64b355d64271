use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::CONFIG_PATH_ENV;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub tmdb: FileTmdbConfig,
    #[serde(default)]
    pub justwatch: FileJustWatchConfig,
    #[serde(default)]
    pub poster: FilePosterConfig,
    #[serde(default)]
    pub cache: FileCacheConfig,
    #[serde(default)]
    pub http: FileHttpConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileTmdbConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileJustWatchConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FilePosterConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCacheConfig {
    /// humantime duration, e.g. `"1h"` or `"90s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_ttl: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileHttpConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub tmdb_read_token: Option<String>,
    pub tmdb_api_base: Option<String>,
    pub tmdb_language: Option<String>,
    pub justwatch_api_base: Option<String>,
    pub justwatch_image_base: Option<String>,
    pub justwatch_locale: Option<String>,
    pub poster_api_base: Option<String>,
    pub poster_api_keys: Option<Vec<String>>,
    pub poster_placeholder_url: Option<String>,
    pub poster_verify: Option<bool>,
    pub search_cache_ttl: Option<String>,
    pub http_timeout: Option<String>,
    pub http_user_agent: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name).filter(|value| !value.trim().is_empty())
        };

        Self {
            config_path: var(CONFIG_PATH_ENV).map(PathBuf::from),
            tmdb_read_token: var("TMDB_READ_API_KEY"),
            tmdb_api_base: var("TMDB_API_BASE"),
            tmdb_language: var("TMDB_LANGUAGE"),
            justwatch_api_base: var("JUSTWATCH_API_BASE"),
            justwatch_image_base: var("JUSTWATCH_IMAGE_BASE"),
            justwatch_locale: var("JUSTWATCH_LOCALE"),
            poster_api_base: var("POSTER_API_BASE"),
            poster_api_keys: var("POSTER_API_KEYS").map(|raw| parse_csv(&raw)),
            poster_placeholder_url: var("POSTER_PLACEHOLDER_URL"),
            poster_verify: var("POSTER_VERIFY").and_then(|raw| parse_bool(&raw)),
            search_cache_ttl: var("SEARCH_CACHE_TTL"),
            http_timeout: var("HTTP_TIMEOUT"),
            http_user_agent: var("HTTP_USER_AGENT"),
        }
    }
}

pub(crate) fn parse_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|part| {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
