use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};
use dashmap::DashMap;
use parking_lot::Mutex;

/// Buckets idle for longer than this are dropped during eviction sweeps.
const BUCKET_TTL: Duration = Duration::from_secs(2 * 60 * 60);
/// One eviction sweep every this many checks.
const EVICT_EVERY: u64 = 256;

/// A token bucket which allows fractional tokens for precise refill
#[derive(Debug)]
struct TokenBucket {
    capacity: f64,
    tokens: f64,
    refill_per_sec: f64,
    last_refill: Instant,
    last_seen: Instant,
}

impl TokenBucket {
    fn new(capacity: f64, refill_per_sec: f64) -> Self {
        let now = Instant::now();
        Self {
            capacity,
            tokens: capacity,
            refill_per_sec,
            last_refill: now,
            last_seen: now,
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        if elapsed > 0.0 {
            self.tokens = (self.tokens + elapsed * self.refill_per_sec).min(self.capacity);
            self.last_refill = now;
        }
    }

    /// Small epsilon to avoid fp surprises
    fn try_consume(&mut self) -> bool {
        self.last_seen = Instant::now();
        self.refill();
        if self.tokens + 1e-12 >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    fn seconds_until_next_token(&self) -> u64 {
        let missing = (1.0 - self.tokens).max(0.0);
        ((missing / self.refill_per_sec).ceil() as u64).max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Limited { retry_after_secs: u64 },
}

/// Per-client token buckets, keyed by client IP.
#[derive(Clone)]
pub struct RateLimiterStore {
    map: Arc<DashMap<String, Arc<Mutex<TokenBucket>>>>,
    capacity: f64,
    refill_per_sec: f64,
    checks: Arc<AtomicU64>,
}

impl RateLimiterStore {
    pub fn new(capacity: u32, refill_per_sec: f64) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            capacity: f64::from(capacity.max(1)),
            refill_per_sec: refill_per_sec.max(f64::EPSILON),
            checks: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Allows `limit` requests per client, refilled evenly over an hour.
    pub fn per_hour(limit: u32) -> Self {
        Self::new(limit, f64::from(limit.max(1)) / 3600.0)
    }

    fn get_bucket(&self, key: &str) -> Arc<Mutex<TokenBucket>> {
        if let Some(existing) = self.map.get(key) {
            return existing.clone();
        }
        self.map
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(TokenBucket::new(self.capacity, self.refill_per_sec))))
            .clone()
    }

    pub fn check(&self, key: &str) -> RateLimitDecision {
        if self.checks.fetch_add(1, Ordering::Relaxed) % EVICT_EVERY == EVICT_EVERY - 1 {
            self.evict_idle(BUCKET_TTL);
        }

        let bucket = self.get_bucket(key);
        let mut bucket = bucket.lock();
        if bucket.try_consume() {
            RateLimitDecision::Allowed { remaining: bucket.tokens.floor() as u32 }
        } else {
            RateLimitDecision::Limited { retry_after_secs: bucket.seconds_until_next_token() }
        }
    }

    fn evict_idle(&self, ttl: Duration) {
        let now = Instant::now();
        self.map
            .retain(|_, bucket| now.duration_since(bucket.lock().last_seen) <= ttl);
    }

    pub fn tracked_clients(&self) -> usize {
        self.map.len()
    }
}
