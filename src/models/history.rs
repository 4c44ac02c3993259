//! Revision history models

use serde::{Deserialize, Serialize};

use crate::client::models::{HistoryEntry, PurviewCommit};

/// Placeholder timestamp for purview commits, which carry no dates
const UNKNOWN_TIME: &str = "unknown";

/// One revision of a gist, from either the purview manifest or platform history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRecord {
    pub login: String,
    pub id: String,
    pub sha: String,
    /// Checkpoint name; `None` for platform history entries and unnamed checkpoints
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl RevisionRecord {
    /// Named checkpoint taken from a purview manifest
    pub fn from_purview(gist_id: &str, login: &str, commit: &PurviewCommit) -> Self {
        Self {
            login: login.to_string(),
            id: gist_id.to_string(),
            sha: commit.sha.clone(),
            description: commit.name.clone(),
            created_at: UNKNOWN_TIME.to_string(),
            updated_at: UNKNOWN_TIME.to_string(),
        }
    }

    /// Unnamed revision taken from the platform's own history
    pub fn from_history(gist_id: &str, login: &str, entry: &HistoryEntry) -> Self {
        Self {
            login: login.to_string(),
            id: gist_id.to_string(),
            sha: entry.version.clone(),
            description: None,
            created_at: entry.committed_at.clone(),
            updated_at: entry.committed_at.clone(),
        }
    }
}

/// Header describing the gist a listing belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryMeta {
    pub login: String,
    pub id: String,
    pub description: Option<String>,
    pub blocks_link: String,
}

impl HistoryMeta {
    pub fn new(
        gist_id: &str,
        login: &str,
        description: Option<String>,
        blocks_run_root: &str,
    ) -> Self {
        Self {
            login: login.to_string(),
            id: gist_id.to_string(),
            description,
            blocks_link: format!("{}{}/{}", blocks_run_root, login, gist_id),
        }
    }
}

/// Merged revision list for one gist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledHistory {
    pub meta: HistoryMeta,
    pub records: Vec<RevisionRecord>,
    /// Platform revisions superseded by the purview manifest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_records: Option<Vec<RevisionRecord>>,
}
