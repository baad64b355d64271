//! Shared fixtures for core integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use metaweave_config::{
    CacheConfig, Config, ConfigMetadata, HttpConfig, JustWatchConfig, PosterConfig, TmdbConfig,
};
use metaweave_core::{ApiRequest, Catalog, HttpTransport, TransportError};
use parking_lot::Mutex;
use serde_json::Value;

pub const TMDB_BASE: &str = "https://api.tmdb.test/3";
pub const JUSTWATCH_BASE: &str = "https://apis.justwatch.test";
pub const POSTER_BASE: &str = "https://img.example.com/";
pub const PLACEHOLDER: &str = "https://placeholder.example/no-image.png";
pub const TOKEN: &str = "test-read-token";

#[derive(Debug, Clone)]
enum Canned {
    Json(Value),
    Status(u16),
}

/// Transport serving canned responses keyed by request path. Poster probes
/// are keyed by the `apikey` parameter and succeed unless told otherwise.
/// Unknown paths fail with a network error.
#[derive(Debug, Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<String, Canned>>,
    probes: Mutex<HashMap<String, u16>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn json(&self, path: &str, body: Value) -> &Self {
        self.routes.lock().insert(path.to_string(), Canned::Json(body));
        self
    }

    pub fn status(&self, path: &str, status_code: u16) -> &Self {
        self.routes.lock().insert(path.to_string(), Canned::Status(status_code));
        self
    }

    pub fn probe_status(&self, credential: &str, status_code: u16) -> &Self {
        self.probes.lock().insert(credential.to_string(), status_code);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn request_to(&self, path: &str) -> Option<ApiRequest> {
        self.requests.lock().iter().find(|r| r.path == path).cloned()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests.lock().iter().filter(|r| r.path == path).count()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn get_json(&self, request: ApiRequest) -> Result<Value, TransportError> {
        self.requests.lock().push(request.clone());
        let canned = self.routes.lock().get(&request.path).cloned();
        match canned {
            Some(Canned::Json(body)) => Ok(body),
            Some(Canned::Status(status_code)) => Err(TransportError::Status {
                status_code,
                body: String::new(),
            }),
            None => Err(TransportError::Network(format!(
                "no canned response for {}",
                request.path
            ))),
        }
    }

    async fn probe(&self, request: ApiRequest) -> Result<(), TransportError> {
        self.requests.lock().push(request.clone());
        let credential = request.param_value("apikey").unwrap_or_default();
        match self.probes.lock().get(credential) {
            Some(&status_code) => Err(TransportError::Status {
                status_code,
                body: String::new(),
            }),
            None => Ok(()),
        }
    }
}

pub fn config() -> Config {
    Config {
        tmdb: TmdbConfig {
            read_token: TOKEN.into(),
            api_base: TMDB_BASE.into(),
            language: "en-US".into(),
        },
        justwatch: JustWatchConfig {
            api_base: JUSTWATCH_BASE.into(),
            image_base: "https://images.justwatch.com".into(),
            locale: "en_US".into(),
        },
        poster: PosterConfig {
            api_base: POSTER_BASE.into(),
            api_keys: vec!["k1".into(), "k2".into()],
            placeholder_url: PLACEHOLDER.into(),
            verify: false,
        },
        cache: CacheConfig {
            search_ttl: Duration::from_secs(3600),
        },
        http: HttpConfig {
            timeout: None,
            user_agent: "metaweave-tests".into(),
        },
        metadata: ConfigMetadata::default(),
    }
}

pub fn catalog(transport: &Arc<FakeTransport>) -> Catalog {
    Catalog::new(transport.clone(), &config())
}

pub fn verifying_catalog(transport: &Arc<FakeTransport>) -> Catalog {
    let mut config = config();
    config.poster.verify = true;
    Catalog::new(transport.clone(), &config)
}

pub fn poster_url(credential: &str, imdb_id: &str) -> String {
    format!("{POSTER_BASE}?apikey={credential}&i={imdb_id}")
}
