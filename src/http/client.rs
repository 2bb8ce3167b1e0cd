//! Rate-limited HTTP fetcher
//!
//! Handles:
//! - Throttle recovery (403/429) using the server's reset time
//! - Optional proactive pacing
//! - Response caching through an injected collaborator
//! - Token authentication and default headers

use super::rate_limit::{throttle_wait_now, RateLimiter, RateLimiterConfig};
use super::response::ApiResponse;
use crate::cache::{NoCache, ResponseCache};
use crate::error::{is_throttle_status, Error, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Media type requested from the search API
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// How the token is presented in the `Authorization` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum AuthScheme {
    /// `Authorization: token <TOKEN>`
    #[default]
    Token,
    /// `Authorization: Bearer <TOKEN>`
    Bearer,
}

impl AuthScheme {
    fn header_value(self, token: &str) -> String {
        match self {
            AuthScheme::Token => format!("token {token}"),
            AuthScheme::Bearer => format!("Bearer {token}"),
        }
    }
}

/// Configuration for the HTTP client
#[derive(Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Access token; no `Authorization` header when absent
    pub token: Option<String>,
    /// Authorization scheme
    pub auth_scheme: AuthScheme,
    /// Value of the `Accept` header
    pub accept: String,
    /// Throttle retries before giving up; `None` retries forever
    pub max_throttle_retries: Option<u32>,
    /// Proactive pacing configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            token: None,
            auth_scheme: AuthScheme::Token,
            accept: GITHUB_ACCEPT.to_string(),
            max_throttle_retries: None,
            rate_limit: None,
            default_headers: HashMap::new(),
            user_agent: format!("reposcout/{}", crate::VERSION),
        }
    }
}

impl std::fmt::Debug for HttpClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClientConfig")
            .field("timeout", &self.timeout)
            .field("token", &self.token.as_ref().map(|_| "****"))
            .field("auth_scheme", &self.auth_scheme)
            .field("accept", &self.accept)
            .field("max_throttle_retries", &self.max_throttle_retries)
            .field("rate_limit", &self.rate_limit)
            .field("default_headers", &self.default_headers)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the access token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Set the authorization scheme
    pub fn auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.config.auth_scheme = scheme;
        self
    }

    /// Bound the number of throttle retries
    pub fn max_throttle_retries(mut self, retries: u32) -> Self {
        self.config.max_throttle_retries = Some(retries);
        self
    }

    /// Retry throttled requests forever
    pub fn unbounded_throttle_retries(mut self) -> Self {
        self.config.max_throttle_retries = None;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client that waits out throttling
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    rate_limiter: Option<RateLimiter>,
    cache: Arc<dyn ResponseCache>,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration and no cache
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            rate_limiter,
            cache: Arc::new(NoCache),
        })
    }

    /// Attach a response cache
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// GET `url`, appending `params` to its query string.
    ///
    /// Throttled responses are retried after the server's reset time. Any
    /// other non-2xx status is returned as [`Error::HttpStatus`].
    pub async fn get(&self, url: &str, params: Option<&[(String, String)]>) -> Result<ApiResponse> {
        let request_url = build_request_url(url, params)?;
        let key = request_url.as_str();

        if let Some(cached) = self.cache.get(key).await {
            debug!("Cache hit: {key}");
            return Ok(cached);
        }

        let response = self.fetch(&request_url).await?;

        if let Err(e) = self.cache.put(key, &response).await {
            warn!("Failed to cache response for {key}: {e}");
        }

        Ok(response)
    }

    async fn fetch(&self, url: &Url) -> Result<ApiResponse> {
        let mut attempt: u32 = 0;

        loop {
            if let Some(ref limiter) = self.rate_limiter {
                limiter.wait().await;
            }

            let mut req = self
                .client
                .get(url.clone())
                .header(ACCEPT, self.config.accept.as_str());

            for (key, value) in &self.config.default_headers {
                req = req.header(key.as_str(), value.as_str());
            }

            if let Some(ref token) = self.config.token {
                req = req.header(AUTHORIZATION, self.config.auth_scheme.header_value(token));
            }

            let response = req.send().await?;
            let status = response.status().as_u16();

            if is_throttle_status(status) {
                attempt += 1;
                if let Some(max) = self.config.max_throttle_retries {
                    if attempt > max {
                        return Err(Error::RateLimitExhausted { attempts: attempt });
                    }
                }

                let wait = throttle_wait_now(response.headers());
                warn!(
                    "Rate limit exceeded ({status}), attempt {attempt}, waiting {}s",
                    wait.as_secs()
                );
                tokio::time::sleep(wait).await;
                continue;
            }

            let response = ApiResponse::from_response(response).await?;
            if !response.is_success() {
                return Err(Error::http_status(status, response.body));
            }

            debug!("Request succeeded: GET {url}");
            return Ok(response);
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Append query parameters to an absolute URL
pub(crate) fn build_request_url(url: &str, params: Option<&[(String, String)]>) -> Result<Url> {
    let mut parsed = Url::parse(url)?;
    if let Some(params) = params {
        if !params.is_empty() {
            parsed.query_pairs_mut().extend_pairs(params);
        }
    }
    Ok(parsed)
}
