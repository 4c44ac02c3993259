//! Fetch-or-cache wrapper

use serde::Serialize;
use serde_json::Value;
use std::future::Future;

use super::{CachedPayload, ResponseCache};
use crate::error::Result;

/// Outcome of `fetch_and_cache`.
///
/// Serializes as the bare payload for live reads and as the
/// `{payload, cachetime}` envelope for cached reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Fetched {
    Live(Value),
    Cached(CachedPayload),
}

impl Fetched {
    pub fn payload(&self) -> &Value {
        match self {
            Fetched::Live(v) => v,
            Fetched::Cached(c) => &c.payload,
        }
    }

    pub fn into_payload(self) -> Value {
        match self {
            Fetched::Live(v) => v,
            Fetched::Cached(c) => c.payload,
        }
    }
}

/// Return the cached payload for `key`, or run `fetch` and cache its result.
///
/// With `key = None` the cache is bypassed entirely. Errors from `fetch`
/// propagate and nothing is stored.
pub async fn fetch_and_cache<F, Fut>(
    cache: &ResponseCache,
    key: Option<&str>,
    fetch: F,
) -> Result<Fetched>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Value>>,
{
    let Some(key) = key else {
        return Ok(Fetched::Live(fetch().await?));
    };

    if let Some(cached) = cache.get(key) {
        log::debug!("Cache hit: {}", key);
        return Ok(Fetched::Cached(cached));
    }

    log::debug!("Cache miss: {}", key);
    let payload = fetch().await?;
    let cached = cache.set(key, payload, cache.default_expiry());
    Ok(Fetched::Cached(cached))
}
