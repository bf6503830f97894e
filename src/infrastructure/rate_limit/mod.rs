//! Request rate limiting

mod rate_limiter;

pub use rate_limiter::{RateLimitResult, RateLimitRule, RateLimiter};
