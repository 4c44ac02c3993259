//! Gist revision history with purview manifests

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{Resource, decode, list_at};
use crate::client::GistApi;
use crate::client::models::Gist;
use crate::error::Result;
use crate::history::{ReconcilePolicy, reconcile};
use crate::models::{HistoryMeta, ReconciledHistory};

/// Branches checked, in order, for a published manifest
const MANIFEST_BRANCHES: [&str; 2] = ["purview", "master"];

/// Manifest file names tried, in order
const MANIFEST_FILES: [&str; 2] = ["_purview.json", "purview.json"];

/// Stored in place of a manifest that exists but could not be read
const BAD_MANIFEST: &str = "bad_json";

/// Revision history of a gist.
///
/// Raw payload: `{"purview": <manifest | null | "bad_json">, "api": <gist>}`.
pub struct Versions;

impl Versions {
    async fn manifest_sha(&self, api: &dyn GistApi, gist_id: &str) -> Result<Option<String>> {
        for branch in MANIFEST_BRANCHES {
            if let Some(sha) = api.resolve_gist_ref(gist_id, branch).await? {
                log::debug!("Gist {} branch {} is at {}", gist_id, branch, sha);
                return Ok(Some(sha));
            }
        }
        Ok(None)
    }

    /// Manifest at `sha`; failures degrade to the bad-manifest marker
    async fn manifest(&self, api: &dyn GistApi, gist_id: &str, sha: &str) -> Value {
        for file in MANIFEST_FILES {
            match api.get_purview_file(gist_id, sha, file).await {
                Ok(manifest) => return manifest,
                Err(err) => log::debug!("No {} for gist {}: {}", file, gist_id, err),
            }
        }
        log::warn!("No readable purview manifest for gist {} at {}", gist_id, sha);
        Value::String(BAD_MANIFEST.to_string())
    }

    /// Reconcile a raw payload into a revision listing
    pub fn reconciled(
        &self,
        payload: &Value,
        gist_id: &str,
        policy: ReconcilePolicy,
        blocks_run_root: &str,
    ) -> Result<ReconciledHistory> {
        let gist: Gist = decode(&payload["api"], "gist")?;
        let meta = HistoryMeta::new(gist_id, &gist.owner.login, gist.description, blocks_run_root);

        // Null means no branch carried a manifest
        let manifest = payload.get("purview").filter(|p| !p.is_null());

        Ok(reconcile(policy, meta, manifest, &gist.history))
    }
}

#[async_trait]
impl Resource for Versions {
    fn name(&self) -> &'static str {
        "versions"
    }

    fn cache_key(&self, gist_id: &str) -> String {
        format!("versions/{}", gist_id)
    }

    fn fields(&self) -> &'static [&'static str] {
        &["version", "committed_at"]
    }

    async fn fetch_raw(&self, api: &dyn GistApi, gist_id: &str) -> Result<Value> {
        let purview = match self.manifest_sha(api, gist_id).await? {
            Some(sha) => self.manifest(api, gist_id, &sha).await,
            None => Value::Null,
        };
        let gist = api.get_gist(gist_id).await?;
        Ok(json!({ "purview": purview, "api": gist }))
    }

    fn records<'a>(&self, payload: &'a Value) -> Result<&'a [Value]> {
        list_at(&payload["api"]["history"], "gist history")
    }
}
