//! Poster URL resolution.
//!
//! Posters come from an image API keyed by IMDB id. Several API keys can be
//! configured; when the provider reports one as rate limited it is marked
//! exhausted and later lookups move on to the next. Resolved URLs are
//! memoized per record for the lifetime of the process.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use metaweave_config::PosterConfig;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::transport::{ApiRequest, HttpTransport, TransportError};

/// Statuses the poster provider answers with once a key is used up.
const RATE_LIMITED: &[u16] = &[401, 429];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterKey {
    pub available: bool,
    pub credential: String,
}

/// Ordered credential pool. Order is configuration order and never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PosterKeyPool {
    keys: Vec<PosterKey>,
}

impl PosterKeyPool {
    pub fn new<I, S>(credentials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys = credentials
            .into_iter()
            .map(Into::<String>::into)
            .filter(|c| !c.trim().is_empty())
            .map(|credential| PosterKey {
                available: true,
                credential,
            })
            .collect();
        Self { keys }
    }

    /// First available credential; the first credential when all are
    /// exhausted; `None` for an empty pool.
    pub fn current(&self) -> Option<&str> {
        self.keys
            .iter()
            .find(|key| key.available)
            .or_else(|| self.keys.first())
            .map(|key| key.credential.as_str())
    }

    /// Returns false when the credential is not in the pool.
    pub fn mark_exhausted(&mut self, credential: &str) -> bool {
        match self.keys.iter_mut().find(|key| key.credential == credential) {
            Some(key) => {
                key.available = false;
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        for key in &mut self.keys {
            key.available = true;
        }
    }

    pub fn available(&self) -> usize {
        self.keys.iter().filter(|key| key.available).count()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

pub struct PosterResolver {
    transport: Arc<dyn HttpTransport>,
    api_base: String,
    placeholder_url: String,
    pool: Mutex<PosterKeyPool>,
    memo: Mutex<HashMap<String, String>>,
}

impl fmt::Debug for PosterResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pool = self.pool.lock();
        f.debug_struct("PosterResolver")
            .field("api_base", &self.api_base)
            .field("placeholder_url", &self.placeholder_url)
            .field("keys", &pool.len())
            .field("keys_available", &pool.available())
            .field("memoized", &self.memo.lock().len())
            .finish()
    }
}

impl PosterResolver {
    pub fn new(transport: Arc<dyn HttpTransport>, config: &PosterConfig) -> Self {
        Self {
            transport,
            api_base: config.api_base.clone(),
            placeholder_url: config.placeholder_url.clone(),
            pool: Mutex::new(PosterKeyPool::new(config.api_keys.iter().cloned())),
            memo: Mutex::new(HashMap::new()),
        }
    }

    pub fn placeholder_url(&self) -> &str {
        &self.placeholder_url
    }

    /// Snapshot of the credential pool.
    pub fn pool(&self) -> PosterKeyPool {
        self.pool.lock().clone()
    }

    pub fn current_credential(&self) -> Option<String> {
        self.pool.lock().current().map(str::to_string)
    }

    /// Mark a credential as rate limited so later lookups skip it.
    pub fn report_rate_limited(&self, credential: &str) {
        if self.pool.lock().mark_exhausted(credential) {
            warn!("Poster credential exhausted; rotating to the next key");
        }
    }

    pub fn reset_credentials(&self) {
        self.pool.lock().reset();
    }

    fn memoized(&self, identifier: &str) -> Option<String> {
        self.memo.lock().get(identifier).cloned()
    }

    fn memoize(&self, identifier: &str, url: &str) {
        self.memo.lock().insert(identifier.to_string(), url.to_string());
    }

    fn poster_url(&self, credential: &str, external_id: &str) -> String {
        let separator = if self.api_base.contains('?') { '&' } else { '?' };
        format!(
            "{}{}apikey={}&i={}",
            self.api_base,
            separator,
            urlencoding::encode(credential),
            urlencoding::encode(external_id)
        )
    }

    /// Poster URL for a record. `identifier` keys the memo table; without an
    /// external id (or without any credential) the placeholder is returned.
    pub fn resolve_poster(&self, identifier: &str, external_id: Option<&str>) -> String {
        if let Some(url) = self.memoized(identifier) {
            debug!("Poster memo HIT for {}", identifier);
            return url;
        }

        let Some(external_id) = external_id.filter(|id| !id.trim().is_empty()) else {
            return self.placeholder_url.clone();
        };
        let Some(credential) = self.current_credential() else {
            return self.placeholder_url.clone();
        };

        let url = self.poster_url(&credential, external_id);
        self.memoize(identifier, &url);
        url
    }

    /// Like [`resolve_poster`](Self::resolve_poster), but probes the provider
    /// first. A rate-limited credential is marked exhausted and the lookup
    /// yields `None`; so does any other failure. Never returns an error.
    pub async fn resolve_poster_checked(
        &self,
        identifier: &str,
        external_id: Option<&str>,
    ) -> Option<String> {
        if let Some(url) = self.memoized(identifier) {
            debug!("Poster memo HIT for {}", identifier);
            return Some(url);
        }

        let Some(external_id) = external_id.filter(|id| !id.trim().is_empty()) else {
            return Some(self.placeholder_url.clone());
        };
        let Some(credential) = self.current_credential() else {
            return Some(self.placeholder_url.clone());
        };

        let request = ApiRequest::new(&self.api_base, "")
            .param("apikey", &credential)
            .param("i", external_id);

        match self.transport.probe(request).await {
            Ok(()) => {
                let url = self.poster_url(&credential, external_id);
                self.memoize(identifier, &url);
                Some(url)
            }
            Err(TransportError::Status { status_code, .. }) if RATE_LIMITED.contains(&status_code) => {
                self.report_rate_limited(&credential);
                None
            }
            Err(err) => {
                warn!("Poster lookup for {} failed: {}", identifier, err);
                None
            }
        }
    }
}
