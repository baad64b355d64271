use std::{path::PathBuf, time::Duration};

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub tmdb: TmdbConfig,
    pub justwatch: JustWatchConfig,
    pub poster: PosterConfig,
    pub cache: CacheConfig,
    pub http: HttpConfig,
    pub metadata: ConfigMetadata,
}

/// Primary catalog (TMDB v3) settings.
#[derive(Clone)]
pub struct TmdbConfig {
    /// v4 read access token, sent as `Authorization: Bearer <token>`.
    pub read_token: String,
    pub api_base: String,
    pub language: String,
}

impl std::fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("read_token", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("language", &self.language)
            .finish()
    }
}

/// Legacy catalog (JustWatch) settings.
#[derive(Debug, Clone)]
pub struct JustWatchConfig {
    pub api_base: String,
    pub image_base: String,
    pub locale: String,
}

#[derive(Clone)]
pub struct PosterConfig {
    pub api_base: String,
    /// Credentials rotated through when one reports a rate limit.
    pub api_keys: Vec<String>,
    pub placeholder_url: String,
    /// Probe the poster provider before handing out a URL.
    pub verify: bool,
}

impl std::fmt::Debug for PosterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosterConfig")
            .field("api_base", &self.api_base)
            .field("api_keys", &self.api_keys.len())
            .field("placeholder_url", &self.placeholder_url)
            .field("verify", &self.verify)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub search_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Unset means the transport's own default applies.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

/// Where the configuration came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
