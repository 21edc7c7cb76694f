use async_trait::async_trait;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::AppError;

const USER_AGENT: &str = concat!("dota_stats/", env!("CARGO_PKG_VERSION"));

/// Raw upstream reply. Classification of the status happens in the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        HttpResponse {
            status,
            body: body.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),
}

/// Issues a single GET against the statistics service.
///
/// Implementations must always resolve: a request that cannot complete
/// returns a [`TransportError`] rather than hanging.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<HttpResponse, TransportError>;
}

/// reqwest-backed transport with a client-side request quota.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(HttpTransport {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            rate_limiter: RateLimiter::direct(Quota::per_minute(config.requests_per_minute)),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<HttpResponse, TransportError> {
        self.rate_limiter.until_ready().await;

        let url = self.url_for(path);
        debug!(url = %url, "GET");

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.query(&[("api_key", key)]);
        }

        let response = request.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        if status != 200 {
            warn!(url = %url, status, "upstream returned non-success status");
        }

        let body = response.text().await.map_err(classify)?;
        Ok(HttpResponse { status, body })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        // strip the URL, it carries the api key
        TransportError::Connection(err.without_url().to_string())
    }
}
