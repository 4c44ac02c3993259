//! Organization roster

use async_trait::async_trait;
use serde_json::Value;

use super::Resource;
use crate::client::GistApi;
use crate::error::Result;
use crate::names::NameDirectory;

/// Organization members joined with their display names
pub struct Members<'a> {
    pub names: &'a NameDirectory,
}

#[async_trait]
impl Resource for Members<'_> {
    fn name(&self) -> &'static str {
        "members"
    }

    fn cache_key(&self, org: &str) -> String {
        format!("members/{}", org)
    }

    fn fields(&self) -> &'static [&'static str] {
        &["login", "name", "avatar_url", "html_url"]
    }

    async fn fetch_raw(&self, api: &dyn GistApi, org: &str) -> Result<Value> {
        let members = api.list_org_members(org).await?;
        self.names.join_members(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{Expiry, ResponseCache};
    use crate::client::MockGistClient;
    use crate::error::Error;
    use crate::resources::fetch_filtered;
    use serde_json::json;

    fn names() -> NameDirectory {
        [("u1".to_string(), "Alice".to_string())].into_iter().collect()
    }

    #[test]
    fn test_cache_key() {
        let names = names();
        assert_eq!(Members { names: &names }.cache_key("acme"), "members/acme");
    }

    #[tokio::test]
    async fn test_raw_roster_drops_unnamed_members() {
        let names = names();
        let api = MockGistClient::new().with_members(
            "acme",
            json!([{"login": "u1"}, {"login": "u2"}]),
        );

        let raw = Members { names: &names }.fetch_raw(&api, "acme").await.unwrap();

        assert_eq!(raw, json!([{"login": "u1", "name": "Alice"}]));
    }

    #[tokio::test]
    async fn test_filtered_roster() {
        let names = names();
        let api = MockGistClient::new().with_members(
            "acme",
            json!([{"login": "u1", "id": 7, "avatar_url": "a", "html_url": "h"}]),
        );
        let cache = ResponseCache::new(Expiry::Never);

        let out = fetch_filtered(&cache, &api, &Members { names: &names }, "acme", true)
            .await
            .unwrap();

        assert_eq!(
            Value::Object(out[0].clone()),
            json!({"login": "u1", "name": "Alice", "avatar_url": "a", "html_url": "h"})
        );
    }

    #[tokio::test]
    async fn test_filtered_roster_missing_field_fails() {
        let names = names();
        let api = MockGistClient::new().with_members("acme", json!([{"login": "u1"}]));
        let cache = ResponseCache::new(Expiry::Never);

        let err = fetch_filtered(&cache, &api, &Members { names: &names }, "acme", false)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::FieldProjectionMissingPath { .. }));
    }
}
