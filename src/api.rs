//! API Client
//!
//! Thin fetch wrappers over the service endpoints. Transport errors come
//! back as strings; callers decide whether that means offline or error.

use milepost_core::summary::SummaryRequest;
use milepost_core::{Goal, Note, Snapshot, Task, TrackerUpdate};
use serde::Deserialize;

#[derive(Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Absolute URL for a same-origin API path; the fetch layer rejects
/// relative URLs.
fn api_url(path: &str) -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .map(|origin| format!("{}{}", origin, path))
        .unwrap_or_else(|| path.to_string())
}

fn tracker_url(namespace: &str) -> String {
    api_url(&format!("/api/tracker?ns={}", namespace))
}

/// Pull the whole remote document.
pub async fn fetch_tracker(namespace: &str) -> Result<Snapshot, String> {
    let response = reqwest::get(&tracker_url(namespace))
        .await
        .map_err(|e| format!("fetch failed: {}", e))?;
    if !response.status().is_success() {
        return Err(format!("fetch status {}", response.status()));
    }
    response
        .json::<Snapshot>()
        .await
        .map_err(|e| format!("fetch decode failed: {}", e))
}

/// Push the whole document; last writer wins on the server.
pub async fn push_tracker(namespace: &str, snapshot: &Snapshot) -> Result<(), String> {
    let update = TrackerUpdate {
        milestones: Some(snapshot.milestones.clone()),
        last_view: Some(snapshot.last_view.clone()),
    };
    let response = reqwest::Client::new()
        .post(&tracker_url(namespace))
        .json(&update)
        .send()
        .await
        .map_err(|e| format!("push failed: {}", e))?;
    if !response.status().is_success() {
        return Err(format!("push status {}", response.status()));
    }
    Ok(())
}

/// Ask the service for a reflection summary of one milestone.
pub async fn request_summary(
    tasks: Vec<Task>,
    standalone_notes: Vec<Note>,
    goal: Goal,
) -> Result<String, String> {
    let body = SummaryRequest {
        tasks,
        standalone_notes,
        goal,
    };
    let response = reqwest::Client::new()
        .post(api_url("/api/summary"))
        .json(&body)
        .send()
        .await
        .map_err(|e| format!("summary request failed: {}", e))?;

    let decoded: SummaryResponse = response
        .json()
        .await
        .map_err(|e| format!("summary decode failed: {}", e))?;
    match (decoded.summary, decoded.error) {
        (Some(summary), _) => Ok(summary),
        (None, Some(error)) => Err(error),
        (None, None) => Err("Unexpected response format".to_string()),
    }
}
