//! Mock GitHub client for testing
//!
//! Provides an in-memory implementation of [`GistApi`] so resources and
//! routes can be exercised without network access.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::GistApi;
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure responses via builder methods, then share behind an `Arc`.
///
/// # Example
/// ```ignore
/// let mock = MockGistClient::new()
///     .with_members("acme", json!([{"login": "u1"}]));
///
/// let members = mock.list_org_members("acme").await?;
/// ```
#[derive(Default)]
pub struct MockGistClient {
    members: HashMap<String, Value>,
    gists: HashMap<String, Value>,
    forks: HashMap<String, Value>,
    /// (gist, ref) -> sha
    refs: HashMap<(String, String), String>,
    /// (gist, sha, file) -> body
    purview_files: HashMap<(String, String, String), Value>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub list_org_members: usize,
    pub get_gist: usize,
    pub list_gist_forks: usize,
    pub resolve_gist_ref: usize,
    pub get_purview_file: usize,
}

impl MockGistClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_members(mut self, org: &str, members: Value) -> Self {
        self.members.insert(org.to_string(), members);
        self
    }

    pub fn with_gist(mut self, gist_id: &str, gist: Value) -> Self {
        self.gists.insert(gist_id.to_string(), gist);
        self
    }

    pub fn with_forks(mut self, gist_id: &str, forks: Value) -> Self {
        self.forks.insert(gist_id.to_string(), forks);
        self
    }

    pub fn with_ref(mut self, gist_id: &str, git_ref: &str, sha: &str) -> Self {
        self.refs
            .insert((gist_id.to_string(), git_ref.to_string()), sha.to_string());
        self
    }

    pub fn with_purview_file(mut self, gist_id: &str, sha: &str, file: &str, body: Value) -> Self {
        self.purview_files.insert(
            (gist_id.to_string(), sha.to_string(), file.to_string()),
            body,
        );
        self
    }

    /// Fail the next call with `error`
    pub fn with_error(mut self, error: ApiError) -> Self {
        self.error = Arc::new(Mutex::new(Some(error)));
        self
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    async fn take_error(&self) -> Result<()> {
        match self.error.lock().await.take() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

fn lookup<K: std::hash::Hash + Eq>(map: &HashMap<K, Value>, key: &K, what: &str) -> Result<Value> {
    map.get(key)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(what.to_string()).into())
}

#[async_trait]
impl GistApi for MockGistClient {
    async fn list_org_members(&self, org: &str) -> Result<Value> {
        self.call_count.lock().await.list_org_members += 1;
        self.take_error().await?;
        lookup(&self.members, &org.to_string(), org)
    }

    async fn get_gist(&self, gist_id: &str) -> Result<Value> {
        self.call_count.lock().await.get_gist += 1;
        self.take_error().await?;
        lookup(&self.gists, &gist_id.to_string(), gist_id)
    }

    async fn list_gist_forks(&self, gist_id: &str) -> Result<Value> {
        self.call_count.lock().await.list_gist_forks += 1;
        self.take_error().await?;
        lookup(&self.forks, &gist_id.to_string(), gist_id)
    }

    async fn resolve_gist_ref(&self, gist_id: &str, git_ref: &str) -> Result<Option<String>> {
        self.call_count.lock().await.resolve_gist_ref += 1;
        self.take_error().await?;
        Ok(self
            .refs
            .get(&(gist_id.to_string(), git_ref.to_string()))
            .cloned())
    }

    async fn get_purview_file(&self, gist_id: &str, sha: &str, file_name: &str) -> Result<Value> {
        self.call_count.lock().await.get_purview_file += 1;
        self.take_error().await?;
        lookup(
            &self.purview_files,
            &(gist_id.to_string(), sha.to_string(), file_name.to_string()),
            file_name,
        )
    }
}
