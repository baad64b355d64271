use url::Url;

use crate::{loader::error::ConfigLoadError, models::Config};

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

/// Reject configurations that cannot work; warn about ones that will
/// merely degrade.
pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    if config.tmdb.read_token.trim().is_empty() {
        return Err(ConfigLoadError::MissingTmdbToken);
    }

    for (field, value) in [
        ("tmdb.api_base", &config.tmdb.api_base),
        ("justwatch.api_base", &config.justwatch.api_base),
        ("justwatch.image_base", &config.justwatch.image_base),
        ("poster.api_base", &config.poster.api_base),
        ("poster.placeholder_url", &config.poster.placeholder_url),
    ] {
        Url::parse(value).map_err(|source| ConfigLoadError::InvalidUrl {
            field,
            value: value.clone(),
            source,
        })?;
    }

    if config.poster.api_keys.is_empty() {
        warnings.push_with_hint(
            "No poster API keys configured; every poster resolves to the placeholder",
            "Set POSTER_API_KEYS to a comma separated list of keys",
        );
    }

    if config.poster.verify && config.poster.api_keys.len() == 1 {
        warnings.push(
            "Poster verification enabled with a single key; a rate limit leaves nothing to rotate to",
        );
    }

    if config.cache.search_ttl.is_zero() {
        warnings.push(
            "SEARCH_CACHE_TTL is zero; every search goes upstream",
        );
    }

    Ok(warnings)
}
