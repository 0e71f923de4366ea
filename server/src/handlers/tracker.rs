//! Tracker Document Endpoints
//!
//! Whole-document storage: GET returns the full milestone collection plus
//! the last view, POST stores whichever of the two fields the body carries.
//! Writes are last-writer-wins; there is no merge and no version check, by
//! design.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use milepost_core::migrate::keys;
use milepost_core::{Milestone, Snapshot, TrackerUpdate, ViewState};

use super::error_response;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TrackerQuery {
    /// Storage namespace; one per account/device group
    #[serde(default = "default_namespace")]
    pub ns: String,
}

fn default_namespace() -> String {
    "default".to_string()
}

/// GET /api/tracker
///
/// Missing or malformed stored data reads as empty; this endpoint never
/// fails because of what is in the store.
pub async fn get_tracker(
    State(state): State<AppState>,
    Query(query): Query<TrackerQuery>,
) -> Response {
    let milestones = match load_milestones(&state, &query.ns).await {
        Ok(milestones) => milestones,
        Err(e) => {
            warn!(error = %e, "tracker read failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error");
        }
    };

    let last_view = state
        .kv
        .get(&keys::last_view(&query.ns))
        .await
        .ok()
        .flatten()
        .and_then(|raw| serde_json::from_str::<ViewState>(&raw).ok())
        .unwrap_or_default();

    Json(Snapshot {
        milestones,
        last_view,
    })
    .into_response()
}

/// POST /api/tracker
///
/// Partial update: each present field is stored under its own key, absent
/// fields stay as they are.
pub async fn post_tracker(
    State(state): State<AppState>,
    Query(query): Query<TrackerQuery>,
    Json(update): Json<TrackerUpdate>,
) -> Response {
    if let Some(milestones) = &update.milestones {
        let raw = match serde_json::to_string(milestones) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "milestones serialization failed");
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error");
            }
        };
        if let Err(e) = state.kv.set(&keys::milestones(&query.ns), &raw).await {
            warn!(error = %e, "tracker write failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error");
        }
    }
    if let Some(view) = &update.last_view {
        let raw = serde_json::to_string(view).unwrap_or_else(|_| r#"{"kind":"dashboard"}"#.into());
        if let Err(e) = state.kv.set(&keys::last_view(&query.ns), &raw).await {
            warn!(error = %e, "last-view write failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error");
        }
    }
    Json(json!({ "success": true })).into_response()
}

/// Read the namespaced milestones key, falling back once to the
/// un-namespaced generation: when only the legacy key exists its contents
/// are copied forward under the namespaced key and the legacy key is left
/// untouched. Deleting legacy data is a separate, explicit operation.
async fn load_milestones(state: &AppState, ns: &str) -> Result<Vec<Milestone>, String> {
    let current_key = keys::milestones(ns);
    if let Some(raw) = state.kv.get(&current_key).await? {
        return Ok(parse_milestones(&raw));
    }

    if let Some(raw) = state.kv.get(keys::UNSCOPED_MILESTONES).await? {
        let milestones = parse_milestones(&raw);
        if !milestones.is_empty() {
            info!(namespace = %ns, "migrating un-namespaced tracker data forward");
            state.kv.set(&current_key, &raw).await?;
            if let Some(view) = state.kv.get(keys::UNSCOPED_LAST_VIEW).await? {
                state.kv.set(&keys::last_view(ns), &view).await?;
            }
        }
        return Ok(milestones);
    }

    Ok(Vec::new())
}

fn parse_milestones(raw: &str) -> Vec<Milestone> {
    match serde_json::from_str(raw) {
        Ok(milestones) => milestones,
        Err(e) => {
            warn!(error = %e, "stored milestones malformed, treating as empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKv;
    use crate::{router, AppState};
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    const MILESTONE_JSON: &str = r#"[{"id":"m1","title":"Q1","startDate":"2026-01-01",
        "endDate":"2026-03-31","createdAt":"2025-12-28T10:00:00Z","tasks":[],
        "standaloneNotes":[]}]"#;

    fn state_with(kv: MemoryKv) -> AppState {
        AppState {
            kv: Arc::new(kv),
            http: reqwest::Client::new(),
            config: Arc::new(crate::config::Config::default()),
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_get_defaults_to_empty_doc() {
        let app = router(state_with(MemoryKv::default()));
        let response = app
            .oneshot(Request::get("/api/tracker").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["milestones"], serde_json::json!([]));
        assert_eq!(body["lastView"]["kind"], "dashboard");
    }

    #[tokio::test]
    async fn test_get_migrates_unscoped_data_forward() {
        let kv = MemoryKv::seeded(&[
            (keys::UNSCOPED_MILESTONES, MILESTONE_JSON),
            (keys::UNSCOPED_LAST_VIEW, r#"{"kind":"milestone","milestoneId":"m1"}"#),
        ]);
        let state = state_with(kv);
        let app = router(state.clone());

        let response = app
            .oneshot(
                Request::get("/api/tracker?ns=alice")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["milestones"][0]["id"], "m1");

        // Copied forward under the namespaced key, source left in place.
        assert!(state.kv.get(&keys::milestones("alice")).await.unwrap().is_some());
        assert!(state.kv.get(keys::UNSCOPED_MILESTONES).await.unwrap().is_some());

        // Second read hits the namespaced key directly.
        let body = body_json(
            router(state)
                .oneshot(
                    Request::get("/api/tracker?ns=alice")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(body["lastView"]["milestoneId"], "m1");
    }

    #[tokio::test]
    async fn test_post_stores_fields_independently() {
        let state = state_with(MemoryKv::default());

        // Only milestones.
        let response = router(state.clone())
            .oneshot(
                Request::post("/api/tracker")
                    .header("content-type", "application/json")
                    .body(Body::from(format!(r#"{{"milestones":{}}}"#, MILESTONE_JSON)))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.kv.get(&keys::milestones("default")).await.unwrap().is_some());
        assert!(state.kv.get(&keys::last_view("default")).await.unwrap().is_none());

        // Only the last view; milestones stay as they were.
        let response = router(state.clone())
            .oneshot(
                Request::post("/api/tracker")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"lastView":{"kind":"dashboard"}}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let stored = state.kv.get(&keys::milestones("default")).await.unwrap().unwrap();
        assert!(stored.contains("m1"));
    }

    #[tokio::test]
    async fn test_malformed_stored_data_reads_as_empty() {
        let key = keys::milestones("default");
        let kv = MemoryKv::seeded(&[(key.as_str(), "{corrupt")]);
        let response = router(state_with(kv))
            .oneshot(Request::get("/api/tracker").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["milestones"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_unsupported_method_is_405() {
        let response = router(state_with(MemoryKv::default()))
            .oneshot(
                Request::delete("/api/tracker")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
