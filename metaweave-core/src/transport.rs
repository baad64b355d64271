//! HTTP seam between the provider clients and the network.
//!
//! Provider clients only ever build an [`ApiRequest`] and hand it to an
//! [`HttpTransport`]. Production uses [`ReqwestTransport`]; tests plug in
//! canned responses.

use async_trait::async_trait;
use metaweave_config::HttpConfig;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// A GET request against one of the upstream APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub base_url: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
            headers: Vec::new(),
            params: Vec::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    /// Look up a query parameter by name.
    pub fn param_value(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Base URL joined with the path, without query parameters.
    pub fn url(&self) -> String {
        if self.path.is_empty() {
            return self.base_url.clone();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("upstream returned status {status_code}")]
    Status { status_code: u16, body: String },

    #[error("request failed: {0}")]
    Network(String),

    #[error("response was not valid JSON: {0}")]
    InvalidJson(String),
}

impl TransportError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Status { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync + std::fmt::Debug {
    /// Issue the request and decode a 2xx body as JSON. Non-2xx responses
    /// become [`TransportError::Status`].
    async fn get_json(&self, request: ApiRequest) -> Result<Value, TransportError>;

    /// Issue the request and only report whether it succeeded; the body is
    /// discarded.
    async fn probe(&self, request: ApiRequest) -> Result<(), TransportError>;
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    async fn send(&self, request: &ApiRequest) -> Result<reqwest::Response, TransportError> {
        let url = request.url();
        debug!("GET {}", url);

        let mut builder = self.client.get(&url).query(&request.params);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get_json(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let response = self.send(&request).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status_code: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| TransportError::InvalidJson(e.to_string()))
    }

    async fn probe(&self, request: ApiRequest) -> Result<(), TransportError> {
        let response = self.send(&request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(TransportError::Status {
            status_code: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_with_single_slash() {
        let request = ApiRequest::new("https://api.example.com/3/", "/movie/1");
        assert_eq!(request.url(), "https://api.example.com/3/movie/1");

        let request = ApiRequest::new("https://api.example.com/3", "search/tv");
        assert_eq!(request.url(), "https://api.example.com/3/search/tv");
    }

    #[test]
    fn empty_path_keeps_base() {
        let request = ApiRequest::new("https://img.example.com/", "").param("i", "tt1");
        assert_eq!(request.url(), "https://img.example.com/");
        assert_eq!(request.param_value("i"), Some("tt1"));
        assert_eq!(request.param_value("apikey"), None);
    }
}
