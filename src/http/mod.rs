//! HTTP client module
//!
//! GET/JSON access to the cluster's REST API: authentication from the auth
//! module, a governor token bucket, and retries with constant, linear or
//! exponential backoff.

mod client;
mod rate_limit;

pub use client::{Backoff, HttpClient, HttpClientConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
