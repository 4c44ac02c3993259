//! Expiring single-entry-per-key store
//!
//! Entries are overwritten on refresh and only disappear with the process.
//! Concurrent misses on the same key are not coalesced: last write wins.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Layout of the C `ctime()` string, e.g. `Tue Mar  1 12:00:00 2016`
const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Format a timestamp the way the cache envelope reports it
pub fn ctime<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format(CTIME_FORMAT).to_string()
}

/// How long a stored entry stays valid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    After(Duration),
    Never,
}

impl Expiry {
    /// An entry is stale once strictly more than the TTL has elapsed.
    pub fn is_expired(&self, fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Expiry::Never => false,
            Expiry::After(ttl) => chrono::Duration::from_std(*ttl)
                .map(|ttl| now.signed_duration_since(fetched_at) > ttl)
                .unwrap_or(false),
        }
    }
}

/// Envelope returned for cached reads: `{"payload": ..., "cachetime": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedPayload {
    pub payload: Value,
    pub cachetime: String,
}

/// A stored entry
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub cached: CachedPayload,
    pub fetched_at: DateTime<Utc>,
    pub expiry: Expiry,
}

/// Process-wide response cache owned by the application context
#[derive(Debug)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    expiry: Expiry,
}

impl ResponseCache {
    /// Create an empty cache whose entries use `expiry` by default
    pub fn new(expiry: Expiry) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            expiry,
        }
    }

    /// Lock the map, recovering the guard if a holder panicked
    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            log::warn!("Response cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Expiry applied by `fetch_and_cache`
    pub fn default_expiry(&self) -> Expiry {
        self.expiry
    }

    /// Get the payload for `key` if present and unexpired
    pub fn get(&self, key: &str) -> Option<CachedPayload> {
        self.get_at(key, Utc::now())
    }

    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<CachedPayload> {
        let guard = self.entries();
        let entry = guard.get(key)?;
        if entry.expiry.is_expired(entry.fetched_at, now) {
            log::debug!("Cache expired: {}", key);
            return None;
        }
        Some(entry.cached.clone())
    }

    /// Store `payload` under `key`, stamped with the current time
    pub fn set(&self, key: &str, payload: Value, expiry: Expiry) -> CachedPayload {
        self.set_at(key, payload, expiry, Utc::now())
    }

    pub fn set_at(
        &self,
        key: &str,
        payload: Value,
        expiry: Expiry,
        now: DateTime<Utc>,
    ) -> CachedPayload {
        let cached = CachedPayload {
            payload,
            cachetime: ctime(&now.with_timezone(&Local)),
        };
        self.entries().insert(
            key.to_string(),
            CacheEntry {
                cached: cached.clone(),
                fetched_at: now,
                expiry,
            },
        );
        cached
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
