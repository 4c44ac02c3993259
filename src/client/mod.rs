//! GitHub API client

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub mod github;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use github::GitHubClient;
#[cfg(test)]
pub use mock::MockGistClient;

/// Upstream operations classroll depends on.
///
/// Raw endpoints return the parsed JSON body untouched so it can be cached
/// and projected as-is.
#[async_trait]
pub trait GistApi: Send + Sync {
    /// List members of an organization (first page of 100)
    async fn list_org_members(&self, org: &str) -> Result<Value>;

    /// Fetch a single gist, including its revision history
    async fn get_gist(&self, gist_id: &str) -> Result<Value>;

    /// List forks of a gist (first page of 100)
    async fn list_gist_forks(&self, gist_id: &str) -> Result<Value>;

    /// Resolve a branch or ref of a gist to a commit sha.
    ///
    /// Returns `None` when the ref does not exist.
    async fn resolve_gist_ref(&self, gist_id: &str, git_ref: &str) -> Result<Option<String>>;

    /// Fetch a raw file published for a gist revision on the purview host
    async fn get_purview_file(&self, gist_id: &str, sha: &str, file_name: &str) -> Result<Value>;
}
