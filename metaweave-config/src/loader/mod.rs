pub mod error;

use once_cell::sync::Lazy;
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

use self::error::ConfigLoadError;
use crate::{
    constants::{
        DEFAULT_JUSTWATCH_API_BASE, DEFAULT_JUSTWATCH_IMAGE_BASE,
        DEFAULT_JUSTWATCH_LOCALE, DEFAULT_POSTER_API_BASE,
        DEFAULT_POSTER_PLACEHOLDER_URL, DEFAULT_SEARCH_CACHE_TTL,
        DEFAULT_TMDB_API_BASE, DEFAULT_TMDB_LANGUAGE, DEFAULT_USER_AGENT,
    },
    models::{
        CacheConfig, Config, ConfigMetadata, HttpConfig, JustWatchConfig,
        PosterConfig, TmdbConfig,
    },
    sources::{EnvConfig, FileConfig},
    validation::{self, ConfigWarnings},
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("metaweave.toml"),
        PathBuf::from("config/metaweave.toml"),
    ]
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Load `.env`, then the config file, then apply process environment
    /// overrides.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        self.load_with_env(EnvConfig::gather(), env_file_loaded)
    }

    /// Same as [`ConfigLoader::load`] but with an explicit environment
    /// snapshot; `.env` handling is left to the caller.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        self.compose_config(file_config, env, config_path, env_file_loaded)
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        // An explicitly named file must exist; a default location may not.
        let (path, explicit) = match (&self.options.config_path, &env.config_path)
        {
            (Some(path), _) | (None, Some(path)) => (path.clone(), true),
            (None, None) => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(path) => (path.clone(), false),
                None => return Ok((None, None)),
            },
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let contents =
            fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
                path: path.clone(),
                source,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|source| {
                ConfigLoadError::Parse {
                    path: path.clone(),
                    source,
                }
            })?;

        debug!("loaded configuration file {}", path.display());
        Ok((Some(file_config), Some(path)))
    }

    fn compose_config(
        &self,
        file_config: Option<FileConfig>,
        env: EnvConfig,
        config_path: Option<PathBuf>,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();

        if config_path.is_none() {
            warnings.push_with_hint(
                "No metaweave.toml detected; falling back to environment variables",
                "Create metaweave.toml or point METAWEAVE_CONFIG at one",
            );
        }

        let FileConfig {
            tmdb: file_tmdb,
            justwatch: file_justwatch,
            poster: file_poster,
            cache: file_cache,
            http: file_http,
        } = file_config.unwrap_or_default();

        let tmdb = TmdbConfig {
            read_token: env
                .tmdb_read_token
                .or(file_tmdb.read_token)
                .unwrap_or_default(),
            api_base: env
                .tmdb_api_base
                .or(file_tmdb.api_base)
                .unwrap_or_else(|| DEFAULT_TMDB_API_BASE.to_string()),
            language: env
                .tmdb_language
                .or(file_tmdb.language)
                .unwrap_or_else(|| DEFAULT_TMDB_LANGUAGE.to_string()),
        };

        let justwatch = JustWatchConfig {
            api_base: env
                .justwatch_api_base
                .or(file_justwatch.api_base)
                .unwrap_or_else(|| DEFAULT_JUSTWATCH_API_BASE.to_string()),
            image_base: env
                .justwatch_image_base
                .or(file_justwatch.image_base)
                .unwrap_or_else(|| DEFAULT_JUSTWATCH_IMAGE_BASE.to_string()),
            locale: env
                .justwatch_locale
                .or(file_justwatch.locale)
                .unwrap_or_else(|| DEFAULT_JUSTWATCH_LOCALE.to_string()),
        };

        let poster = PosterConfig {
            api_base: env
                .poster_api_base
                .or(file_poster.api_base)
                .unwrap_or_else(|| DEFAULT_POSTER_API_BASE.to_string()),
            api_keys: env
                .poster_api_keys
                .or(file_poster.api_keys)
                .unwrap_or_default(),
            placeholder_url: env
                .poster_placeholder_url
                .or(file_poster.placeholder_url)
                .unwrap_or_else(|| DEFAULT_POSTER_PLACEHOLDER_URL.to_string()),
            verify: env.poster_verify.or(file_poster.verify).unwrap_or(false),
        };

        let cache = CacheConfig {
            search_ttl: parse_duration(
                "cache.search_ttl",
                env.search_cache_ttl.or(file_cache.search_ttl),
            )?
            .unwrap_or(DEFAULT_SEARCH_CACHE_TTL),
        };

        let http = HttpConfig {
            timeout: parse_duration(
                "http.timeout",
                env.http_timeout.or(file_http.timeout),
            )?,
            user_agent: env
                .http_user_agent
                .or(file_http.user_agent)
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        };

        let config = Config {
            tmdb,
            justwatch,
            poster,
            cache,
            http,
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        };

        warnings.extend(validation::apply_guard_rails(&config)?);

        Ok(ConfigLoad { config, warnings })
    }
}

fn parse_duration(
    field: &'static str,
    raw: Option<String>,
) -> Result<Option<Duration>, ConfigLoadError> {
    raw.map(|value| {
        humantime::parse_duration(value.trim()).map_err(|source| {
            ConfigLoadError::InvalidDuration {
                field,
                value,
                source,
            }
        })
    })
    .transpose()
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}
