//! Bounded, time-limited memory of recently seen idempotency keys.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Remembers idempotency keys for `ttl`, holding at most `capacity` of them.
///
/// When full, the oldest key is forgotten to make room.
#[derive(Debug)]
pub struct IdempotencyCache {
    ttl: Duration,
    capacity: usize,
    entries: Mutex<HashMap<String, Instant>>,
}

impl IdempotencyCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity: capacity.max(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Record `key` as processed.
    ///
    /// Returns `false` if the key was already claimed and has not expired.
    pub fn try_claim(&self, key: &str) -> bool {
        self.try_claim_at(key, Instant::now())
    }

    fn try_claim_at(&self, key: &str, now: Instant) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        entries.retain(|_, seen| now.saturating_duration_since(*seen) < self.ttl);

        if entries.contains_key(key) {
            return false;
        }

        if entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, seen)| **seen)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }

        entries.insert(key.to_string(), now);
        true
    }

    /// Number of keys currently remembered (including not-yet-purged expired ones).
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
