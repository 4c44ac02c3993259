//! Resource fetchers
//!
//! Each resource pairs a raw upstream fetch with a cache key and the field
//! paths its filtered view keeps. The generic helpers below plug any
//! resource into the cache and the projector.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::cache::{Fetched, ResponseCache, fetch_and_cache};
use crate::client::GistApi;
use crate::error::{ApiError, Result};
use crate::projection::project;

pub mod forks;
pub mod members;
pub mod time;
pub mod versions;

pub use forks::Forks;
pub use members::Members;
pub use time::Clock;
pub use versions::Versions;

/// A cacheable upstream resource
#[async_trait]
pub trait Resource: Send + Sync {
    /// Short name used in logs and error messages
    fn name(&self) -> &'static str;

    /// Deterministic cache key for `arg`
    fn cache_key(&self, arg: &str) -> String;

    /// Paths kept by the filtered view
    fn fields(&self) -> &'static [&'static str];

    /// Fetch the raw payload from upstream
    async fn fetch_raw(&self, api: &dyn GistApi, arg: &str) -> Result<Value>;

    /// The list of records the filtered view projects
    fn records<'a>(&self, payload: &'a Value) -> Result<&'a [Value]> {
        list_at(payload, self.name())
    }
}

/// Borrow `value` as a JSON array or report the payload as malformed
pub(crate) fn list_at<'a>(value: &'a Value, what: &str) -> Result<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ApiError::Malformed(format!("{} is not a list", what)).into())
}

/// Decode part of a raw payload into a typed model
pub(crate) fn decode<T: DeserializeOwned>(value: &Value, what: &str) -> Result<T> {
    T::deserialize(value)
        .map_err(|e| ApiError::Malformed(format!("Unexpected {} shape: {}", what, e)).into())
}

/// Raw payload, from the cache when `cached` is set
pub async fn fetch<R: Resource + ?Sized>(
    cache: &ResponseCache,
    api: &dyn GistApi,
    resource: &R,
    arg: &str,
    cached: bool,
) -> Result<Fetched> {
    let key = cached.then(|| resource.cache_key(arg));
    fetch_and_cache(cache, key.as_deref(), || resource.fetch_raw(api, arg)).await
}

/// Filtered view: the resource's records projected onto its fields
pub async fn fetch_filtered<R: Resource + ?Sized>(
    cache: &ResponseCache,
    api: &dyn GistApi,
    resource: &R,
    arg: &str,
    cached: bool,
) -> Result<Vec<Map<String, Value>>> {
    let fetched = fetch(cache, api, resource, arg, cached).await?;
    project(resource.records(fetched.payload())?, resource.fields())
}
