//! Purview manifest models

use serde::{Deserialize, Serialize};

/// Curated list of named commits published alongside a gist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurviewManifest {
    pub commits: Vec<PurviewCommit>,
}

/// A named checkpoint in the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurviewCommit {
    pub sha: String,
    /// Checkpoint label; `null` in some manifests
    #[serde(default)]
    pub name: Option<String>,
}
