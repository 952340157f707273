//! Fingerprinted, TTL-bounded response cache.
//!
//! Keys are `Fingerprint`s computed from fully resolved requests, never from
//! free text, so semantically identical queries phrased differently share a
//! cache line. Entries are immutable once written; a refresh replaces the
//! entry wholesale, and concurrent writers to the same fingerprint resolve
//! last-write-wins.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;
use tracing::debug;

use oikos_types::{Fingerprint, NormalizedSeries, ProviderId};

struct Entry {
    payload: Vec<NormalizedSeries>,
    inserted_at: Instant,
    ttl: Duration,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        // Validity is the half-open interval [inserted_at, inserted_at + ttl).
        now.saturating_duration_since(self.inserted_at) < self.ttl
    }
}

/// LRU + TTL store for normalized responses.
///
/// TTLs are provider-configurable: shorter for high-frequency data, longer
/// for annual macro series.
pub struct ResponseCache {
    inner: Mutex<LruCache<Fingerprint, Entry>>,
    ttls: HashMap<ProviderId, Duration>,
    default_ttl: Duration,
}

impl ResponseCache {
    /// Build a cache with a capacity bound and per-provider TTLs. Providers
    /// missing from the map fall back to `default_ttl`.
    ///
    /// # Panics
    /// Never; a zero capacity is clamped to one.
    #[must_use]
    pub fn new(capacity: usize, ttls: HashMap<ProviderId, Duration>, default_ttl: Duration) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).expect("clamped to >= 1");
        Self {
            inner: Mutex::new(LruCache::new(cap)),
            ttls,
            default_ttl,
        }
    }

    fn ttl_for(&self, provider: ProviderId) -> Duration {
        self.ttls.get(&provider).copied().unwrap_or(self.default_ttl)
    }

    /// Fetch a live entry, or `None` on miss or expiry. Expired entries are
    /// removed on the way out.
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<Vec<NormalizedSeries>> {
        self.get_at(fingerprint, Instant::now())
    }

    /// Clock-injected variant of [`get`](Self::get), used by tests.
    #[must_use]
    pub fn get_at(&self, fingerprint: &Fingerprint, now: Instant) -> Option<Vec<NormalizedSeries>> {
        let mut guard = self.inner.lock().expect("mutex poisoned");
        match guard.get(fingerprint) {
            Some(entry) if entry.is_live(now) => {
                debug!(provider = %fingerprint.provider(), "cache hit");
                Some(entry.payload.clone())
            }
            Some(_) => {
                guard.pop(fingerprint);
                None
            }
            None => None,
        }
    }

    /// Store a response, replacing any previous entry for the fingerprint.
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    pub fn put(&self, fingerprint: Fingerprint, payload: Vec<NormalizedSeries>) {
        self.put_at(fingerprint, payload, Instant::now());
    }

    /// Clock-injected variant of [`put`](Self::put), used by tests.
    pub fn put_at(&self, fingerprint: Fingerprint, payload: Vec<NormalizedSeries>, now: Instant) {
        let ttl = self.ttl_for(fingerprint.provider());
        let mut guard = self.inner.lock().expect("mutex poisoned");
        guard.put(
            fingerprint,
            Entry {
                payload,
                inserted_at: now,
                ttl,
            },
        );
    }

    /// Drop every expired entry.
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    pub fn evict_expired(&self) {
        self.evict_expired_at(Instant::now());
    }

    /// Clock-injected variant of [`evict_expired`](Self::evict_expired).
    pub fn evict_expired_at(&self, now: Instant) {
        let mut guard = self.inner.lock().expect("mutex poisoned");
        let dead: Vec<Fingerprint> = guard
            .iter()
            .filter(|(_, e)| !e.is_live(now))
            .map(|(k, _)| k.clone())
            .collect();
        for key in dead {
            guard.pop(&key);
        }
    }

    /// Number of entries currently held (live or not yet evicted).
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().expect("mutex poisoned").len()
    }

    /// True when the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop everything.
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    pub fn clear(&self) {
        self.inner.lock().expect("mutex poisoned").clear();
    }
}
