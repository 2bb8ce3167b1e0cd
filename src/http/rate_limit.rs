//! Rate limiting
//!
//! Two halves: a governor token bucket that spaces requests out before they
//! are sent, and the wait computation applied after the server throttles.

use chrono::Utc;
use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use reqwest::header::HeaderMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Header carrying the epoch second at which the quota resets
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// Configuration for proactive pacing
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Maximum number of requests per minute
    pub requests_per_minute: u32,
    /// Burst size (max tokens in bucket)
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    /// Authenticated search quota
    fn default() -> Self {
        Self {
            requests_per_minute: 30,
            burst_size: 10,
        }
    }
}

impl RateLimiterConfig {
    /// Create a new rate limiter config
    pub fn new(requests_per_minute: u32, burst_size: u32) -> Self {
        Self {
            requests_per_minute,
            burst_size,
        }
    }
}

/// Token bucket rate limiter
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config
    pub fn new(config: &RateLimiterConfig) -> Self {
        let per_minute = NonZeroU32::new(config.requests_per_minute).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(config.burst_size).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_minute(per_minute).allow_burst(burst);

        Self {
            limiter: Arc::new(Governor::direct(quota)),
        }
    }

    /// Wait until a request can be made
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(&RateLimiterConfig::default())
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish()
    }
}

/// How long to sleep after a throttled response.
///
/// Uses `x-ratelimit-reset` (epoch seconds) minus `now`, falling back to
/// `Retry-After` and then to zero. The wait is clamped at zero and one
/// extra second is always added.
pub fn throttle_wait(headers: &HeaderMap, now: i64) -> Duration {
    let wait = match header_i64(headers, RATE_LIMIT_RESET_HEADER) {
        Some(reset) => reset.saturating_sub(now),
        None => header_i64(headers, reqwest::header::RETRY_AFTER.as_str()).unwrap_or(0),
    };

    Duration::from_secs(wait.max(0) as u64 + 1)
}

/// Same as [`throttle_wait`] against the current clock
pub(crate) fn throttle_wait_now(headers: &HeaderMap) -> Duration {
    throttle_wait(headers, Utc::now().timestamp())
}

fn header_i64(headers: &HeaderMap, name: &str) -> Option<i64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod rate_limit_tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_rate_limiter_config_default() {
        let config = RateLimiterConfig::default();
        assert_eq!(config.requests_per_minute, 30);
        assert_eq!(config.burst_size, 10);
    }

    #[tokio::test]
    async fn test_rate_limiter_burst_does_not_block() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(60, 5));

        let start = std::time::Instant::now();
        for _ in 0..5 {
            limiter.wait().await;
        }
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_rate_limiter_zero_quota_falls_back_to_one() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(0, 0));
        limiter.wait().await;
    }

    #[test]
    fn test_throttle_wait_uses_reset_header() {
        let map = headers(&[("x-ratelimit-reset", "1010")]);
        assert_eq!(throttle_wait(&map, 1000), Duration::from_secs(11));
    }

    #[test]
    fn test_throttle_wait_clamps_past_reset() {
        let map = headers(&[("x-ratelimit-reset", "900")]);
        assert_eq!(throttle_wait(&map, 1000), Duration::from_secs(1));
    }

    #[test]
    fn test_throttle_wait_zero_reset() {
        let map = headers(&[("x-ratelimit-reset", "0")]);
        assert_eq!(throttle_wait(&map, 1000), Duration::from_secs(1));
    }

    #[test]
    fn test_throttle_wait_missing_headers() {
        assert_eq!(throttle_wait(&HeaderMap::new(), 1000), Duration::from_secs(1));
    }

    #[test]
    fn test_throttle_wait_retry_after_fallback() {
        let map = headers(&[("retry-after", "5")]);
        assert_eq!(throttle_wait(&map, 1000), Duration::from_secs(6));
    }

    #[test]
    fn test_throttle_wait_reset_wins_over_retry_after() {
        let map = headers(&[("x-ratelimit-reset", "1002"), ("retry-after", "60")]);
        assert_eq!(throttle_wait(&map, 1000), Duration::from_secs(3));
    }

    #[test]
    fn test_throttle_wait_extreme_reset_values() {
        let map = headers(&[("x-ratelimit-reset", "-9223372036854775808")]);
        assert_eq!(throttle_wait(&map, 1000), Duration::from_secs(1));

        let map = headers(&[("x-ratelimit-reset", "9223372036854775807")]);
        assert_eq!(throttle_wait(&map, -1000).as_secs(), i64::MAX as u64 + 1);
    }

    #[test]
    fn test_throttle_wait_ignores_garbage() {
        let map = headers(&[("x-ratelimit-reset", "soon")]);
        assert_eq!(throttle_wait(&map, 1000), Duration::from_secs(1));
    }
}
