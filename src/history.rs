//! Revision reconciliation
//!
//! Merges a purview manifest (named checkpoints) with the platform's own
//! revision history (every commit, unnamed). No two records in the result
//! share a sha.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::client::models::{HistoryEntry, PurviewManifest};
use crate::error::{Error, Result};
use crate::models::{HistoryMeta, ReconciledHistory, RevisionRecord};

/// How platform history is combined with the purview manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcilePolicy {
    /// Newer platform revisions up to the first purview sha, then the manifest.
    ///
    /// Assumes the manifest shas form a contiguous suffix of platform history.
    /// Revisions older than the boundary are never reached.
    Truncating,

    /// Manifest only, with every other platform revision kept as hidden.
    #[default]
    Full,
}

/// Parse a manifest into named records, keeping the first commit per sha
pub fn purview_records(
    gist_id: &str,
    login: &str,
    manifest: &Value,
) -> Result<Vec<RevisionRecord>> {
    let manifest = PurviewManifest::deserialize(manifest)
        .map_err(|e| Error::ManifestUnavailable(e.to_string()))?;

    let mut seen = HashSet::new();
    Ok(manifest
        .commits
        .iter()
        .filter(|c| seen.insert(c.sha.as_str()))
        .map(|c| RevisionRecord::from_purview(gist_id, login, c))
        .collect())
}

/// Manifest records, or none when the manifest is absent or unusable
fn purview_or_empty(meta: &HistoryMeta, manifest: Option<&Value>) -> Vec<RevisionRecord> {
    let Some(manifest) = manifest else {
        return Vec::new();
    };
    match purview_records(&meta.id, &meta.login, manifest) {
        Ok(records) => records,
        Err(err) => {
            log::warn!("{}; gist {} falls back to platform history", err, meta.id);
            Vec::new()
        }
    }
}

/// Combine manifest and platform history for one gist
pub fn reconcile(
    policy: ReconcilePolicy,
    meta: HistoryMeta,
    manifest: Option<&Value>,
    history: &[HistoryEntry],
) -> ReconciledHistory {
    let purview = purview_or_empty(&meta, manifest);
    let known: HashSet<&str> = purview.iter().map(|r| r.sha.as_str()).collect();

    match policy {
        ReconcilePolicy::Truncating => {
            let mut records: Vec<RevisionRecord> = history
                .iter()
                .take_while(|h| !known.contains(h.version.as_str()))
                .map(|h| RevisionRecord::from_history(&meta.id, &meta.login, h))
                .collect();
            records.extend(purview);

            ReconciledHistory {
                meta,
                records,
                hidden_records: None,
            }
        }
        ReconcilePolicy::Full => {
            let unnamed: Vec<RevisionRecord> = history
                .iter()
                .filter(|h| !known.contains(h.version.as_str()))
                .map(|h| RevisionRecord::from_history(&meta.id, &meta.login, h))
                .collect();

            if purview.is_empty() {
                ReconciledHistory {
                    meta,
                    records: unnamed,
                    hidden_records: None,
                }
            } else {
                ReconciledHistory {
                    meta,
                    records: purview,
                    hidden_records: Some(unnamed),
                }
            }
        }
    }
}
