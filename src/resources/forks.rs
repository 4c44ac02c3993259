//! Gist forks (assignment submissions)

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{Resource, decode, list_at};
use crate::client::GistApi;
use crate::client::models::Gist;
use crate::error::Result;
use crate::models::ForkListing;

/// A gist together with its forks.
///
/// Raw payload: `{"forks": [...], "api": <gist>}`.
pub struct Forks;

#[async_trait]
impl Resource for Forks {
    fn name(&self) -> &'static str {
        "forks"
    }

    fn cache_key(&self, gist_id: &str) -> String {
        format!("forks/{}", gist_id)
    }

    fn fields(&self) -> &'static [&'static str] {
        &["id", "owner/login", "owner/avatar_url", "owner/html_url"]
    }

    async fn fetch_raw(&self, api: &dyn GistApi, gist_id: &str) -> Result<Value> {
        let (gist, forks) =
            futures::try_join!(api.get_gist(gist_id), api.list_gist_forks(gist_id))?;
        Ok(json!({ "forks": forks, "api": gist }))
    }

    fn records<'a>(&self, payload: &'a Value) -> Result<&'a [Value]> {
        list_at(&payload["forks"], "fork list")
    }
}

impl Forks {
    /// Parent gist followed by every fork
    pub fn listing(&self, payload: &Value, blocks_run_root: &str) -> Result<ForkListing> {
        let parent: Gist = decode(&payload["api"], "gist")?;
        let forks: Vec<Gist> = decode(&payload["forks"], "fork list")?;
        Ok(ForkListing::new(&parent, &forks, blocks_run_root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockGistClient;
    use crate::error::{ApiError, Error};

    fn gist(id: &str, login: &str) -> Value {
        json!({
            "id": id,
            "description": format!("{} by {}", id, login),
            "owner": {
                "login": login,
                "avatar_url": format!("https://a/{}", login),
                "html_url": "h"
            },
            "created_at": "2016-03-01T00:00:00Z",
            "updated_at": "2016-03-02T00:00:00Z"
        })
    }

    fn api() -> MockGistClient {
        MockGistClient::new()
            .with_gist("g1", gist("g1", "instructor"))
            .with_forks("g1", json!([gist("f1", "s1"), gist("f2", "s2")]))
    }

    #[tokio::test]
    async fn test_raw_payload_composes_gist_and_forks() {
        let payload = Forks.fetch_raw(&api(), "g1").await.unwrap();

        assert_eq!(payload["api"]["id"], "g1");
        assert_eq!(payload["forks"].as_array().unwrap().len(), 2);
        assert_eq!(Forks.records(&payload).unwrap()[1]["id"], "f2");
    }

    #[tokio::test]
    async fn test_listing_puts_parent_first() {
        let payload = Forks.fetch_raw(&api(), "g1").await.unwrap();

        let listing = Forks.listing(&payload, "https://bl.ocks.org/").unwrap();

        let logins: Vec<&str> = listing.records.iter().map(|r| r.login.as_str()).collect();
        assert_eq!(logins, vec!["instructor", "s1", "s2"]);
        assert_eq!(listing.meta.blocks_link, "https://bl.ocks.org/instructor/g1");
        assert_eq!(listing.meta.description.as_deref(), Some("g1 by instructor"));
        assert_eq!(listing.records[1].avatar_url, "https://a/s1");
    }

    #[tokio::test]
    async fn test_missing_gist_propagates() {
        let err = Forks
            .fetch_raw(&MockGistClient::new(), "nope")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::NotFound(_))));
    }

    #[test]
    fn test_listing_rejects_malformed_payload() {
        let payload = json!({"forks": {"message": "Not Found"}, "api": gist("g1", "t")});

        let err = Forks.listing(&payload, "r/").unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::Malformed(_))));
    }
}
