//! HTTP client module
//!
//! Provides the rate-limited fetcher used by the pager.
//!
//! # Features
//!
//! - **Throttle Recovery**: 403/429 responses are retried after the reset time
//! - **Pacing**: Optional token bucket limiter using governor
//! - **Response Cache**: Pluggable cache consulted before each request
//! - **Authentication**: Static token sent on every request

mod client;
mod rate_limit;
mod response;

pub use client::{AuthScheme, HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{throttle_wait, RateLimiter, RateLimiterConfig};
pub use response::ApiResponse;
