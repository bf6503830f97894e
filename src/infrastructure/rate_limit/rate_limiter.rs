//! Rate limiter implementation
//!
//! Sliding window limits per client and bucket.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::RwLock;

/// Maximum number of requests allowed within a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RateLimitRule {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl RateLimitRule {
    pub const fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

/// Result of a rate limit check
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    /// Whether the request is allowed
    pub allowed: bool,
    /// Remaining requests in the current window
    pub remaining: u32,
    /// Total limit for the window
    pub limit: u32,
    /// Time until the oldest request leaves the window (in seconds)
    pub reset_in_seconds: u64,
}

/// Sliding window rate limiter shared by all buckets
#[derive(Debug)]
pub struct RateLimiter {
    /// Request timestamps per bucket and client
    records: Arc<RwLock<HashMap<String, Vec<Instant>>>>,
    /// Records older than this are dropped on cleanup
    retention: Duration,
    /// Cleanup interval
    cleanup_interval: Duration,
    /// Last cleanup time
    last_cleanup: Arc<RwLock<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter keeping history for `retention`
    pub fn new(retention: Duration) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            retention,
            cleanup_interval: Duration::from_secs(300),
            last_cleanup: Arc::new(RwLock::new(Instant::now())),
        }
    }

    /// Check the rule for `key` and record the request if it is allowed
    pub async fn check_and_record(&self, key: &str, rule: &RateLimitRule) -> RateLimitResult {
        self.maybe_cleanup().await;

        let now = Instant::now();
        let window_start = now.checked_sub(rule.window()).unwrap_or(now);
        let mut records = self.records.write().await;
        let key_records = records.entry(key.to_string()).or_default();

        key_records.retain(|t| *t >= window_start);
        let count = key_records.len() as u32;

        if count >= rule.max_requests {
            let reset_in = key_records
                .iter()
                .min()
                .map(|t| rule.window_secs.saturating_sub(now.duration_since(*t).as_secs()))
                .unwrap_or(rule.window_secs);

            return RateLimitResult {
                allowed: false,
                remaining: 0,
                limit: rule.max_requests,
                reset_in_seconds: reset_in,
            };
        }

        key_records.push(now);

        RateLimitResult {
            allowed: true,
            remaining: rule.max_requests.saturating_sub(count + 1),
            limit: rule.max_requests,
            reset_in_seconds: rule.window_secs,
        }
    }

    async fn maybe_cleanup(&self) {
        let should_cleanup = {
            let last = self.last_cleanup.read().await;
            last.elapsed() >= self.cleanup_interval
        };

        if should_cleanup {
            let mut last = self.last_cleanup.write().await;
            *last = Instant::now();

            let now = Instant::now();
            let cutoff = now.checked_sub(self.retention).unwrap_or(now);

            let mut records = self.records.write().await;

            for key_records in records.values_mut() {
                key_records.retain(|t| *t >= cutoff);
            }

            records.retain(|_, v| !v.is_empty());
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Duration::from_secs(900))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_allows_first_request() {
        let limiter = RateLimiter::default();
        let rule = RateLimitRule::new(10, 60);

        let result = limiter.check_and_record("client", &rule).await;

        assert!(result.allowed);
        assert_eq!(result.remaining, 9);
        assert_eq!(result.limit, 10);
    }

    #[tokio::test]
    async fn test_blocks_over_limit() {
        let limiter = RateLimiter::default();
        let rule = RateLimitRule::new(2, 60);

        assert!(limiter.check_and_record("client", &rule).await.allowed);
        assert!(limiter.check_and_record("client", &rule).await.allowed);

        let result = limiter.check_and_record("client", &rule).await;
        assert!(!result.allowed);
        assert_eq!(result.remaining, 0);
        assert!(result.reset_in_seconds <= 60);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let limiter = RateLimiter::default();
        let rule = RateLimitRule::new(1, 60);

        limiter.check_and_record("experiments:a", &rule).await;

        assert!(limiter.check_and_record("experiments:b", &rule).await.allowed);
        assert!(limiter.check_and_record("history:a", &rule).await.allowed);
        assert!(!limiter.check_and_record("experiments:a", &rule).await.allowed);
    }

    #[tokio::test]
    async fn test_window_slides() {
        let limiter = RateLimiter::default();
        let rule = RateLimitRule::new(1, 0);

        // A zero-length window never holds a previous request
        assert!(limiter.check_and_record("client", &rule).await.allowed);
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(limiter.check_and_record("client", &rule).await.allowed);
    }
}
