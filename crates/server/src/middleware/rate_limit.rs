use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use crate::config::RateLimitConfig;
use crate::error::AdError;
use crate::rest::AppState;

/// Process-wide token bucket.
///
/// Tokens refill lazily on every check, `elapsed * refill_per_second`,
/// clamped to `capacity`. The bucket starts full, so a burst of `capacity`
/// requests is admitted immediately and the sustained rate converges to
/// `refill_per_second`.
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<RateLimiterInner>,
}

struct RateLimiterInner {
    capacity: f64,
    refill_per_second: f64,
    bucket: Mutex<Bucket>,
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl Bucket {
    fn refill(&mut self, now: Instant, capacity: f64, refill_per_second: f64) {
        // Callers may sample `now` before a competing caller takes the lock;
        // never move the timestamp backwards.
        if now <= self.last_refill {
            return;
        }
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * refill_per_second).min(capacity);
        self.last_refill = now;
    }
}

impl RateLimiter {
    pub fn new(capacity: u64, refill_per_second: f64) -> Self {
        Self::starting_at(capacity, refill_per_second, Instant::now())
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.capacity, config.refill_per_second)
    }

    pub fn starting_at(capacity: u64, refill_per_second: f64, now: Instant) -> Self {
        let capacity = capacity as f64;
        Self {
            inner: Arc::new(RateLimiterInner {
                capacity,
                refill_per_second,
                bucket: Mutex::new(Bucket {
                    tokens: capacity,
                    last_refill: now,
                }),
            }),
        }
    }

    pub fn try_consume(&self, cost: u64) -> bool {
        self.try_consume_at(cost, Instant::now())
    }

    /// Refill and consume as one step under the bucket lock.
    pub fn try_consume_at(&self, cost: u64, now: Instant) -> bool {
        let mut bucket = self.lock();
        bucket.refill(now, self.inner.capacity, self.inner.refill_per_second);
        let cost = cost as f64;
        if bucket.tokens >= cost {
            bucket.tokens -= cost;
            true
        } else {
            false
        }
    }

    pub fn available_tokens(&self) -> f64 {
        self.available_tokens_at(Instant::now())
    }

    /// Token count as of `now`, without recording a refill.
    pub fn available_tokens_at(&self, now: Instant) -> f64 {
        let bucket = self.lock();
        let elapsed = now.saturating_duration_since(bucket.last_refill).as_secs_f64();
        (bucket.tokens + elapsed * self.inner.refill_per_second).min(self.inner.capacity)
    }

    pub fn capacity(&self) -> u64 {
        self.inner.capacity as u64
    }

    pub fn refill_per_second(&self) -> f64 {
        self.inner.refill_per_second
    }

    fn lock(&self) -> MutexGuard<'_, Bucket> {
        // Bucket state is plain numbers; a panic elsewhere cannot leave it torn.
        self.inner
            .bucket
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Path group guarded by the limiter. Anything else passes through untouched.
pub const LIMITED_PREFIX: &str = "/ads";

pub fn is_limited_path(path: &str) -> bool {
    match path.strip_prefix(LIMITED_PREFIX) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !is_limited_path(request.uri().path()) {
        return next.run(request).await;
    }
    if !state.limiter.try_consume(1) {
        state.metrics.inc_rate_limited();
        tracing::debug!(
            method = %request.method(),
            path = %request.uri().path(),
            "rate limit exceeded"
        );
        return AdError::RateLimited.into_response();
    }
    state.metrics.inc_ad_requests();
    next.run(request).await
}
