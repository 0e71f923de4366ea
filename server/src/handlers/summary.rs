//! Reflection Summary Endpoint
//!
//! Proxies a language-model call: assembles the prompt from milestone data
//! (see `milepost_core::summary`) and forwards it, so the API key never
//! reaches the browser. Failures surface as an error message; they never
//! touch stored tracker data.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use milepost_core::summary::{build_reflection_prompt, SummaryRequest};

use super::error_response;
use crate::AppState;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const MAX_TOKENS: u32 = 1000;

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// POST /api/summary
pub async fn post_summary(State(state): State<AppState>, Json(body): Json<serde_json::Value>) -> Response {
    // The two required fields are checked before full deserialization so a
    // partial body gets a 400, not a decode error.
    if body.get("tasks").is_none() || body.get("goal").is_none() {
        return error_response(StatusCode::BAD_REQUEST, "Missing required data");
    }
    let request: SummaryRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "summary request malformed");
            return error_response(StatusCode::BAD_REQUEST, "Missing required data");
        }
    };

    let api_key = match &state.config.anthropic_api_key {
        Some(key) => key.clone(),
        None => {
            warn!("summary requested but no API key is configured");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate summary");
        }
    };

    let prompt = build_reflection_prompt(&request);
    let upstream = state
        .http
        .post(MESSAGES_URL)
        .header("x-api-key", api_key)
        .header("anthropic-version", "2023-06-01")
        .json(&MessagesRequest {
            model: &state.config.summary_model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: &prompt,
            }],
        })
        .send()
        .await;

    let response = match upstream {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "summary upstream call failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate summary");
        }
    };
    if !response.status().is_success() {
        warn!(status = %response.status(), "summary upstream returned an error");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate summary");
    }

    match response.json::<MessagesResponse>().await {
        Ok(decoded) => match decoded.content.first().and_then(|block| block.text.clone()) {
            Some(summary) => Json(json!({ "summary": summary })).into_response(),
            None => error_response(StatusCode::INTERNAL_SERVER_ERROR, "Unexpected response format"),
        },
        Err(e) => {
            warn!(error = %e, "summary upstream response malformed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Unexpected response format")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKv;
    use crate::router;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> crate::AppState {
        crate::AppState {
            kv: Arc::new(MemoryKv::default()),
            http: reqwest::Client::new(),
            config: Arc::new(crate::config::Config::default()),
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_fields_is_400() {
        let response = router(state())
            .oneshot(
                Request::post("/api/summary")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"standaloneNotes":[]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing required data");
    }

    #[tokio::test]
    async fn test_wrong_method_is_405() {
        let response = router(state())
            .oneshot(Request::get("/api/summary").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_without_api_key_is_500() {
        let response = router(state())
            .oneshot(
                Request::post("/api/summary")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"tasks":[],"standaloneNotes":[],
                            "goal":{"title":"Q1","startDate":"2026-01-01","endDate":"2026-03-31"}}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to generate summary");
    }
}
