//! Run configuration
//!
//! [`Settings`] is the single value the orchestrator is built from. The CLI
//! fills it from flags and environment variables; library callers can build
//! one directly.

use crate::cache::DEFAULT_CACHE_TTL;
use crate::error::{Error, Result};
use crate::http::{AuthScheme, HttpClientConfig, RateLimiterConfig};
use crate::output::DEFAULT_DESCRIPTION_LENGTH;
use crate::types::QueryParams;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Default search endpoint
pub const DEFAULT_ENDPOINT: &str = "/search/repositories";

/// Default search query
pub const DEFAULT_QUERY: &str = "quasar OR quasar-framework in:topics";

/// Default page size; also the API maximum
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Default output file
pub const DEFAULT_CSV_FILE: &str = "quasar_repos.csv";

/// Default cache file
pub const DEFAULT_CACHE_FILE: &str = "github_cache.json";

/// Largest page size the search API accepts
pub const MAX_PER_PAGE: u32 = 100;

/// Everything needed for one export run
#[derive(Clone)]
pub struct Settings {
    pub base_url: String,
    pub endpoint: String,
    pub query: String,
    pub per_page: u32,
    pub sort: String,
    pub order: String,
    pub csv_file: PathBuf,
    pub token: String,
    pub auth_scheme: AuthScheme,
    /// `None` disables the response cache
    pub cache_file: Option<PathBuf>,
    pub cache_ttl: Duration,
    /// `None` retries throttled requests forever
    pub max_throttle_retries: Option<u32>,
    /// `None` disables proactive pacing
    pub requests_per_minute: Option<u32>,
    pub description_length: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            query: DEFAULT_QUERY.to_string(),
            per_page: DEFAULT_PER_PAGE,
            sort: "stars".to_string(),
            order: "desc".to_string(),
            csv_file: PathBuf::from(DEFAULT_CSV_FILE),
            token: String::new(),
            auth_scheme: AuthScheme::Token,
            cache_file: Some(PathBuf::from(DEFAULT_CACHE_FILE)),
            cache_ttl: DEFAULT_CACHE_TTL,
            max_throttle_retries: Some(10),
            requests_per_minute: Some(30),
            description_length: DEFAULT_DESCRIPTION_LENGTH,
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("endpoint", &self.endpoint)
            .field("query", &self.query)
            .field("per_page", &self.per_page)
            .field("sort", &self.sort)
            .field("order", &self.order)
            .field("csv_file", &self.csv_file)
            .field("token", &"****")
            .field("auth_scheme", &self.auth_scheme)
            .field("cache_file", &self.cache_file)
            .field("cache_ttl", &self.cache_ttl)
            .field("max_throttle_retries", &self.max_throttle_retries)
            .field("requests_per_minute", &self.requests_per_minute)
            .field("description_length", &self.description_length)
            .finish()
    }
}

impl Settings {
    /// Check required fields and ranges. Runs before any network call.
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(Error::missing_field("GITHUB_TOKEN"));
        }
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(Error::invalid_value(
                "PER_PAGE",
                format!("must be between 1 and {MAX_PER_PAGE}, got {}", self.per_page),
            ));
        }
        if self.query.trim().is_empty() {
            return Err(Error::missing_field("QUERY"));
        }
        self.search_url()?;
        Ok(())
    }

    /// Base URL joined with the endpoint path
    pub fn search_url(&self) -> Result<Url> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("BASE_URL", e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(Error::invalid_value("BASE_URL", "not a base URL"));
        }

        let base = format!("{}/", base.as_str().trim_end_matches('/'));
        let base = Url::parse(&base)?;
        Ok(base.join(self.endpoint.trim_start_matches('/'))?)
    }

    /// Query parameters for the first page
    pub fn search_params(&self) -> QueryParams {
        vec![
            ("q".to_string(), self.query.clone()),
            ("per_page".to_string(), self.per_page.to_string()),
            ("sort".to_string(), self.sort.clone()),
            ("order".to_string(), self.order.clone()),
        ]
    }

    /// HTTP client configuration derived from these settings
    pub fn http_config(&self) -> HttpClientConfig {
        let builder = HttpClientConfig::builder()
            .token(self.token.clone())
            .auth_scheme(self.auth_scheme);

        let builder = match self.max_throttle_retries {
            Some(max) => builder.max_throttle_retries(max),
            None => builder.unbounded_throttle_retries(),
        };

        let builder = match self.requests_per_minute {
            Some(rpm) => builder.rate_limit(RateLimiterConfig::new(
                rpm,
                RateLimiterConfig::default().burst_size.min(rpm),
            )),
            None => builder.no_rate_limit(),
        };

        builder.build()
    }
}
