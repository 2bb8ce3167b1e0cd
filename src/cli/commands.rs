//! CLI arguments
//!
//! Every option can also come from the environment, so the tool runs the
//! same way from a shell, a `.env`-loading wrapper or CI.

use crate::config::{
    Settings, DEFAULT_BASE_URL, DEFAULT_CACHE_FILE, DEFAULT_CSV_FILE, DEFAULT_ENDPOINT,
    DEFAULT_QUERY,
};
use crate::http::AuthScheme;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Export GitHub repository search results to a sorted CSV file
#[derive(Parser, Debug)]
#[command(name = "reposcout")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API root
    #[arg(long, env = "BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Search endpoint path
    #[arg(long, env = "ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Search query
    #[arg(short, long, env = "QUERY", default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Results per page (1-100)
    #[arg(long, env = "PER_PAGE", default_value_t = 100)]
    pub per_page: u32,

    /// Sort field passed to the API
    #[arg(long, env = "SORT", default_value = "stars")]
    pub sort: String,

    /// Sort order passed to the API
    #[arg(long, env = "ORDER", default_value = "desc")]
    pub order: String,

    /// Output CSV file
    #[arg(short, long = "csv-file", env = "CSV_FILE", default_value = DEFAULT_CSV_FILE)]
    pub csv_file: PathBuf,

    /// Access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Authorization header scheme
    #[arg(long, value_enum, default_value = "token")]
    pub auth_scheme: AuthScheme,

    /// Response cache file
    #[arg(long, env = "CACHE_FILE", default_value = DEFAULT_CACHE_FILE)]
    pub cache_file: PathBuf,

    /// Cache entry lifetime in seconds
    #[arg(long, env = "CACHE_TTL", default_value_t = 3600)]
    pub cache_ttl: u64,

    /// Disable the response cache
    #[arg(long)]
    pub no_cache: bool,

    /// Throttle retries per request (0 = unlimited)
    #[arg(long, env = "MAX_THROTTLE_RETRIES", default_value_t = 10)]
    pub max_throttle_retries: u32,

    /// Request pacing (0 = no pacing)
    #[arg(long, env = "REQUESTS_PER_MINUTE", default_value_t = 30)]
    pub requests_per_minute: u32,

    /// Maximum description length in the output
    #[arg(long, env = "DESCRIPTION_LENGTH", default_value_t = 80)]
    pub description_length: usize,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Convert parsed arguments into run settings
    pub fn settings(&self) -> Settings {
        Settings {
            base_url: self.base_url.clone(),
            endpoint: self.endpoint.clone(),
            query: self.query.clone(),
            per_page: self.per_page,
            sort: self.sort.clone(),
            order: self.order.clone(),
            csv_file: self.csv_file.clone(),
            token: self.token.clone().unwrap_or_default(),
            auth_scheme: self.auth_scheme,
            cache_file: (!self.no_cache).then(|| self.cache_file.clone()),
            cache_ttl: Duration::from_secs(self.cache_ttl),
            max_throttle_retries: (self.max_throttle_retries > 0)
                .then_some(self.max_throttle_retries),
            requests_per_minute: (self.requests_per_minute > 0)
                .then_some(self.requests_per_minute),
            description_length: self.description_length,
        }
    }
}
