//! Built-in defaults for every optional setting.

use std::time::Duration;

pub const DEFAULT_TMDB_API_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TMDB_LANGUAGE: &str = "en-US";

pub const DEFAULT_JUSTWATCH_API_BASE: &str = "https://apis.justwatch.com";
pub const DEFAULT_JUSTWATCH_IMAGE_BASE: &str = "https://images.justwatch.com";
pub const DEFAULT_JUSTWATCH_LOCALE: &str = "en_US";

pub const DEFAULT_POSTER_API_BASE: &str = "https://img.omdbapi.com/";
pub const DEFAULT_POSTER_PLACEHOLDER_URL: &str = "https://upload.wikimedia.org/wikipedia/commons/thumb/6/65/No-Image-Placeholder.svg/1665px-No-Image-Placeholder.svg.png";

/// Search results are reused for an hour.
pub const DEFAULT_SEARCH_CACHE_TTL: Duration = Duration::from_secs(3600);

pub const DEFAULT_USER_AGENT: &str =
    concat!("metaweave/", env!("CARGO_PKG_VERSION"));

pub const CONFIG_PATH_ENV: &str = "METAWEAVE_CONFIG";
