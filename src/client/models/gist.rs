//! Gist models

use serde::{Deserialize, Serialize};

/// Gist or gist fork as returned by `GET /gists/{id}` and `GET /gists/{id}/forks`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gist {
    /// Gist ID
    pub id: String,

    /// Free-form description, absent on some gists
    #[serde(default)]
    pub description: Option<String>,

    /// Owning account
    pub owner: GistOwner,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub updated_at: String,

    /// Revision history, newest first (only on the single-gist endpoint)
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// Account that owns a gist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GistOwner {
    pub login: String,

    #[serde(default)]
    pub avatar_url: String,
}

/// One revision of a gist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Commit sha of the revision
    pub version: String,

    pub committed_at: String,
}
