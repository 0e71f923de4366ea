//! UI Location and Sync State
//!
//! Small shared enums: where the user last was, and how the remote sync is
//! doing. Both travel over the wire, so they serialize like the rest of the
//! model.

use serde::{Deserialize, Serialize};

/// Last-viewed UI location, restored after reload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ViewState {
    #[default]
    Dashboard,
    #[serde(rename_all = "camelCase")]
    Milestone { milestone_id: String },
}

impl ViewState {
    pub fn milestone(id: impl Into<String>) -> Self {
        ViewState::Milestone {
            milestone_id: id.into(),
        }
    }
}

/// State of the best-effort remote sync, shown in the header indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    #[default]
    Synced,
    Syncing,
    Offline,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_state_wire_format() {
        let dashboard = serde_json::to_string(&ViewState::Dashboard).unwrap();
        assert_eq!(dashboard, r#"{"kind":"dashboard"}"#);

        let view = serde_json::to_string(&ViewState::milestone("m1")).unwrap();
        assert_eq!(view, r#"{"kind":"milestone","milestoneId":"m1"}"#);

        let parsed: ViewState = serde_json::from_str(&view).unwrap();
        assert_eq!(parsed, ViewState::milestone("m1"));
    }
}
