//! GitHub API client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};
use serde_json::Value;

use super::GistApi;
use crate::config::Config;
use crate::error::{ApiError, ConfigError, Result};

/// Items requested per page; later pages are not fetched
const PER_PAGE: &str = "100";

const USER_AGENT: &str = concat!("classroll/", env!("CARGO_PKG_VERSION"));

/// Extract the revision sha from a gist revision url
/// (`https://api.github.com/gists/{id}/{sha}`).
pub fn revision_sha_from_url(url: &str) -> Option<String> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// GitHub API client
pub struct GitHubClient {
    http: HttpClient,
    api_base: String,
    purview_root: String,
    token: String,
}

impl GitHubClient {
    /// Create a new client; every request is bounded by `timeout`
    pub fn new(
        token: impl Into<String>,
        api_base: impl Into<String>,
        purview_root: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;

        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            purview_root: purview_root.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Create a client from validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let token = config
            .github_token
            .clone()
            .ok_or(ConfigError::MissingToken)?;
        Self::new(
            token,
            config.api_base.clone(),
            config.purview_root.clone(),
            config.request_timeout(),
        )
    }

    fn api_get(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_base, path);
        log::debug!("GET {}", url);
        self.http
            .get(url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github+json")
    }

    /// Send a request and parse a successful body as JSON
    async fn send_json(&self, request: RequestBuilder, what: &str) -> Result<Value> {
        let response = request.send().await.map_err(ApiError::from)?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let data = response.json::<Value>().await.map_err(|e| {
                    ApiError::Malformed(format!("Failed to parse {}: {}", what, e))
                })?;
                Ok(data)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized.into()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(what.to_string()).into()),
            status if status.is_server_error() => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::Unavailable(format!("{} ({}): {}", what, status, body)).into())
            }
            _ => Err(ApiError::Unavailable(format!(
                "Unexpected status code {} for {}",
                status, what
            ))
            .into()),
        }
    }
}

#[async_trait]
impl GistApi for GitHubClient {
    async fn list_org_members(&self, org: &str) -> Result<Value> {
        let request = self
            .api_get(&format!("/orgs/{}/members", org))
            .query(&[("per_page", PER_PAGE)]);
        self.send_json(request, &format!("members of {}", org)).await
    }

    async fn get_gist(&self, gist_id: &str) -> Result<Value> {
        let request = self.api_get(&format!("/gists/{}", gist_id));
        self.send_json(request, &format!("gist {}", gist_id)).await
    }

    async fn list_gist_forks(&self, gist_id: &str) -> Result<Value> {
        let request = self
            .api_get(&format!("/gists/{}/forks", gist_id))
            .query(&[("per_page", PER_PAGE)]);
        self.send_json(request, &format!("forks of {}", gist_id))
            .await
    }

    async fn resolve_gist_ref(&self, gist_id: &str, git_ref: &str) -> Result<Option<String>> {
        let response = self
            .api_get(&format!("/gists/{}/{}", gist_id, git_ref))
            .send()
            .await
            .map_err(ApiError::from)?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
                log::debug!("Branch {} not found on gist {}", git_ref, gist_id);
                return Ok(None);
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ApiError::Unauthorized.into());
            }
            status => {
                return Err(ApiError::Unavailable(format!(
                    "Unexpected status code {} resolving {}/{}",
                    status, gist_id, git_ref
                ))
                .into());
            }
        }

        let body = response.json::<Value>().await.map_err(|e| {
            ApiError::Malformed(format!("Failed to parse gist revision: {}", e))
        })?;

        let sha = body
            .get("url")
            .and_then(Value::as_str)
            .and_then(revision_sha_from_url);
        if sha.is_none() {
            log::debug!("Revision of {} at {} carries no url", gist_id, git_ref);
        }
        Ok(sha)
    }

    async fn get_purview_file(&self, gist_id: &str, sha: &str, file_name: &str) -> Result<Value> {
        let url = format!(
            "{}/anonymous/raw/{}/{}/{}",
            self.purview_root, gist_id, sha, file_name
        );
        log::debug!("GET {}", url);
        self.send_json(self.http.get(url), file_name).await
    }
}
