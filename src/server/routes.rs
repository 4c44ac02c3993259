//! Route handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use super::view::{View, parse_target};
use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::history::ReconcilePolicy;
use crate::resources::{Clock, Forks, Members, Resource, Versions, fetch, fetch_filtered};

type Ctx = State<Arc<AppContext>>;

/// Views every resource shares. `Default` renders as the cached filtered view.
async fn serve_view<R: Resource>(
    ctx: &AppContext,
    resource: &R,
    arg: &str,
    view: View,
) -> Result<Response> {
    let api = ctx.api.as_ref();
    let response = match view {
        View::RawLive => Json(fetch(&ctx.cache, api, resource, arg, false).await?).into_response(),
        View::Raw => Json(fetch(&ctx.cache, api, resource, arg, true).await?).into_response(),
        View::Live => {
            Json(fetch_filtered(&ctx.cache, api, resource, arg, false).await?).into_response()
        }
        View::Filtered | View::Default => {
            Json(fetch_filtered(&ctx.cache, api, resource, arg, true).await?).into_response()
        }
    };
    Ok(response)
}

pub async fn health(State(ctx): Ctx) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "cached_entries": ctx.cache.len(),
    }))
}

pub async fn not_found() -> Error {
    Error::NotFound("route".to_string())
}

/// `/time.{view}`
pub async fn time(State(ctx): Ctx, Path(file): Path<String>) -> Result<Response> {
    let (name, view) = parse_target(&file)?;
    if name != "time" {
        return Err(Error::NotFound(format!("route '{}'", file)));
    }
    log::info!("GET /{}", file);
    serve_view(&ctx, &Clock, "", view).await
}

/// `/members/{org}.{view}`
pub async fn members(State(ctx): Ctx, Path(file): Path<String>) -> Result<Response> {
    let (org, view) = parse_target(&file)?;
    log::info!("GET /members/{}", file);
    let resource = Members { names: &ctx.names };
    serve_view(&ctx, &resource, org, view).await
}

/// `/forks/{gist}.{view}`; the default view is the fork listing
pub async fn forks(State(ctx): Ctx, Path(file): Path<String>) -> Result<Response> {
    let (gist_id, view) = parse_target(&file)?;
    log::info!("GET /forks/{}", file);
    if view != View::Default {
        return serve_view(&ctx, &Forks, gist_id, view).await;
    }

    let fetched = fetch(&ctx.cache, ctx.api.as_ref(), &Forks, gist_id, true).await?;
    let listing = Forks.listing(fetched.payload(), &ctx.config.blocks_run_root)?;
    Ok(Json(listing).into_response())
}

#[derive(Debug, Deserialize)]
pub struct VersionsQuery {
    policy: Option<ReconcilePolicy>,
}

/// `/versions/{gist}.{view}`; the default view is the reconciled history
pub async fn versions(
    State(ctx): Ctx,
    Path(file): Path<String>,
    Query(query): Query<VersionsQuery>,
) -> Result<Response> {
    let (gist_id, view) = parse_target(&file)?;
    log::info!("GET /versions/{}", file);
    if view != View::Default {
        return serve_view(&ctx, &Versions, gist_id, view).await;
    }

    let policy = query.policy.unwrap_or(ctx.config.default_policy);
    let fetched = fetch(&ctx.cache, ctx.api.as_ref(), &Versions, gist_id, true).await?;
    let history = Versions.reconciled(
        fetched.payload(),
        gist_id,
        policy,
        &ctx.config.blocks_run_root,
    )?;
    Ok(Json(history).into_response())
}

/// `/assignment/{id}.json`
pub async fn assignment(State(ctx): Ctx, Path(file): Path<String>) -> Result<Response> {
    let (id, view) = parse_target(&file)?;
    if view != View::Default {
        return Err(Error::NotFound(format!("route '{}'", file)));
    }
    log::info!("GET /assignment/{}", file);
    let descriptor = ctx.assignments.get(id)?;
    Ok(Json(descriptor.as_ref().clone()).into_response())
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::client::MockGistClient;
    use crate::config::Config;
    use crate::context::AppContext;
    use crate::names::NameDirectory;
    use crate::server::router;

    fn gist() -> Value {
        json!({
            "id": "g1",
            "description": "Assignment 1",
            "owner": {"login": "instructor", "avatar_url": "https://a/t", "html_url": "h"},
            "created_at": "c",
            "updated_at": "u",
            "history": [
                {"version": "c1", "committed_at": "t4"},
                {"version": "c2", "committed_at": "t3"},
                {"version": "c3", "committed_at": "t2"},
                {"version": "c4", "committed_at": "t1"}
            ]
        })
    }

    fn mock() -> MockGistClient {
        MockGistClient::new()
            .with_members(
                "acme",
                json!([
                    {"login": "u1", "avatar_url": "a1", "html_url": "h1"},
                    {"login": "u2", "avatar_url": "a2", "html_url": "h2"}
                ]),
            )
            .with_gist("g1", gist())
            .with_forks(
                "g1",
                json!([{
                    "id": "f1",
                    "description": null,
                    "owner": {"login": "u1", "avatar_url": "a1", "html_url": "h1"},
                    "created_at": "c",
                    "updated_at": "u"
                }]),
            )
            .with_ref("g1", "purview", "c3")
            .with_purview_file(
                "g1",
                "c3",
                "_purview.json",
                json!({"commits": [{"sha": "c3", "name": "Final"}]}),
            )
    }

    fn context(api: Arc<MockGistClient>, assignments_dir: &std::path::Path) -> Arc<AppContext> {
        let config = Config {
            assignments_dir: assignments_dir.to_path_buf(),
            ..Config::default()
        };
        let names: NameDirectory = [("u1".to_string(), "Alice".to_string())]
            .into_iter()
            .collect();
        Arc::new(AppContext::with_parts(config, api, names))
    }

    async fn get(ctx: &Arc<AppContext>, uri: &str) -> (StatusCode, Value) {
        let response = router(Arc::clone(ctx))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_members_default_view_is_filtered() {
        let dir = TempDir::new().unwrap();
        let ctx = context(Arc::new(mock()), dir.path());

        let (status, body) = get(&ctx, "/members/acme.json").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{"login": "u1", "name": "Alice", "avatar_url": "a1", "html_url": "h1"}])
        );
    }

    #[tokio::test]
    async fn test_members_raw_is_enveloped_and_cached() {
        let dir = TempDir::new().unwrap();
        let api = Arc::new(mock());
        let ctx = context(Arc::clone(&api), dir.path());

        let (_, first) = get(&ctx, "/members/acme.raw.json").await;
        let (_, second) = get(&ctx, "/members/acme.raw.json").await;

        assert_eq!(first, second);
        assert!(first["cachetime"].is_string());
        assert_eq!(first["payload"][0]["name"], "Alice");
        assert_eq!(api.call_counts().await.list_org_members, 1);
    }

    #[tokio::test]
    async fn test_members_raw_live_is_bare_and_uncached() {
        let dir = TempDir::new().unwrap();
        let api = Arc::new(mock());
        let ctx = context(Arc::clone(&api), dir.path());

        let (_, body) = get(&ctx, "/members/acme.raw.live.json").await;
        get(&ctx, "/members/acme.raw.live.json").await;

        assert!(body.is_array());
        assert_eq!(api.call_counts().await.list_org_members, 2);
    }

    #[tokio::test]
    async fn test_forks_listing() {
        let dir = TempDir::new().unwrap();
        let ctx = context(Arc::new(mock()), dir.path());

        let (status, body) = get(&ctx, "/forks/g1.json").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["login"], "instructor");
        assert_eq!(body["records"][0]["id"], "g1");
        assert_eq!(body["records"][1]["login"], "u1");
    }

    #[tokio::test]
    async fn test_forks_filtered() {
        let dir = TempDir::new().unwrap();
        let ctx = context(Arc::new(mock()), dir.path());

        let (_, body) = get(&ctx, "/forks/g1.filtered.json").await;

        assert_eq!(
            body,
            json!([{
                "id": "f1",
                "owner/login": "u1",
                "owner/avatar_url": "a1",
                "owner/html_url": "h1"
            }])
        );
    }

    #[tokio::test]
    async fn test_versions_policies() {
        let dir = TempDir::new().unwrap();
        let ctx = context(Arc::new(mock()), dir.path());

        let (_, full) = get(&ctx, "/versions/g1.json").await;
        let (_, truncated) = get(&ctx, "/versions/g1.json?policy=truncating").await;

        assert_eq!(full["records"].as_array().unwrap().len(), 1);
        assert_eq!(full["records"][0]["description"], "Final");
        assert_eq!(full["hidden_records"].as_array().unwrap().len(), 3);

        let shas: Vec<&str> = truncated["records"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["sha"].as_str().unwrap())
            .collect();
        assert_eq!(shas, vec!["c1", "c2", "c3"]);
        assert!(truncated.get("hidden_records").is_none());
    }

    #[tokio::test]
    async fn test_time_views() {
        let dir = TempDir::new().unwrap();
        let ctx = context(Arc::new(mock()), dir.path());

        let (status, live) = get(&ctx, "/time.live.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(live[0]["time"].is_string());

        let (status, _) = get(&ctx, "/clock.json").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500() {
        let dir = TempDir::new().unwrap();
        let ctx = context(Arc::new(mock()), dir.path());

        let (status, body) = get(&ctx, "/forks/missing.json").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("missing"));
    }

    #[tokio::test]
    async fn test_unknown_suffix_is_404() {
        let dir = TempDir::new().unwrap();
        let ctx = context(Arc::new(mock()), dir.path());

        let (status, _) = get(&ctx, "/members/acme.html").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_assignment_descriptor() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("a1.json"),
            r#"{"meta": {"title": "A1"}, "records": []}"#,
        )
        .unwrap();
        let ctx = context(Arc::new(mock()), dir.path());

        let (status, body) = get(&ctx, "/assignment/a1.json").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["title"], "A1");

        let (status, _) = get(&ctx, "/assignment/a2.json").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let dir = TempDir::new().unwrap();
        let ctx = context(Arc::new(mock()), dir.path());

        let (status, body) = get(&ctx, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
