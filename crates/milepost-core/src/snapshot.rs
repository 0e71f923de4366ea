//! Tracker Snapshot
//!
//! The whole-document working set: every milestone plus the last-viewed UI
//! location. All mutations are synchronous transformations of this value;
//! persistence and sync layers treat it as one document.

use serde::{Deserialize, Serialize};

use crate::domain::{Milestone, ViewState};
use crate::entity::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, deserialize_with = "crate::domain::null_to_empty")]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub last_view: ViewState,
}

/// Partial remote write: each present field is stored independently, absent
/// fields are left untouched server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TrackerUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestones: Option<Vec<Milestone>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_view: Option<ViewState>,
}

impl Snapshot {
    pub fn new(milestones: Vec<Milestone>) -> Self {
        Self {
            milestones,
            last_view: ViewState::Dashboard,
        }
    }

    pub fn milestone(&self, id: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == id)
    }

    pub fn milestone_mut(&mut self, id: &str) -> Option<&mut Milestone> {
        self.milestones.iter_mut().find(|m| m.id == id)
    }

    /// Append a milestone after validating it and checking id uniqueness.
    pub fn create_milestone(&mut self, milestone: Milestone) -> DomainResult<()> {
        milestone.validate()?;
        if self.milestone(&milestone.id).is_some() {
            return Err(DomainError::Conflict(format!(
                "milestone id '{}' already exists",
                milestone.id
            )));
        }
        self.milestones.push(milestone);
        Ok(())
    }

    /// Replace the milestone with the same id in place; every other entry and
    /// the overall order are untouched.
    pub fn update_milestone(&mut self, milestone: Milestone) -> DomainResult<()> {
        milestone.validate()?;
        match self.milestone_mut(&milestone.id) {
            Some(slot) => {
                *slot = milestone;
                Ok(())
            }
            None => Err(DomainError::NotFound(format!(
                "milestone '{}'",
                milestone.id
            ))),
        }
    }

    /// Remove by id. Removing an id that is not present is a no-op, not an
    /// error; the return value says whether anything was removed.
    pub fn delete_milestone(&mut self, id: &str) -> bool {
        let before = self.milestones.len();
        self.milestones.retain(|m| m.id != id);
        let view_gone = matches!(
            &self.last_view,
            ViewState::Milestone { milestone_id } if milestone_id == id
        );
        if view_gone {
            self.last_view = ViewState::Dashboard;
        }
        self.milestones.len() != before
    }

    pub fn set_last_view(&mut self, view: ViewState) {
        self.last_view = view;
    }

    /// The stored last view, demoted to the dashboard when it references a
    /// milestone that no longer exists.
    pub fn resolve_view(&self) -> ViewState {
        match &self.last_view {
            ViewState::Milestone { milestone_id } if self.milestone(milestone_id).is_none() => {
                ViewState::Dashboard
            }
            view => view.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn milestone(id: &str, title: &str) -> Milestone {
        Milestone::new(
            id.into(),
            title.into(),
            date("2026-01-01"),
            date("2026-03-31"),
            "2025-12-28T10:00:00Z".into(),
        )
    }

    fn snapshot_abc() -> Snapshot {
        Snapshot::new(vec![
            milestone("a", "Alpha"),
            milestone("b", "Beta"),
            milestone("c", "Gamma"),
        ])
    }

    #[test]
    fn test_create_rejects_duplicate_id() {
        let mut snapshot = snapshot_abc();
        let err = snapshot.create_milestone(milestone("b", "Clone")).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(snapshot.milestones.len(), 3);
    }

    #[test]
    fn test_update_is_order_stable() {
        let mut snapshot = snapshot_abc();
        let mut changed = milestone("b", "Beta renamed");
        changed.end_date = date("2026-06-30");
        snapshot.update_milestone(changed).unwrap();

        let ids: Vec<&str> = snapshot.milestones.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(snapshot.milestone("b").unwrap().title, "Beta renamed");
        assert_eq!(snapshot.milestone("a").unwrap().title, "Alpha");
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let mut snapshot = snapshot_abc();
        let err = snapshot.update_milestone(milestone("zz", "Ghost")).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn test_delete_missing_is_a_noop() {
        let mut snapshot = snapshot_abc();
        assert!(!snapshot.delete_milestone("zz"));
        assert_eq!(snapshot.milestones.len(), 3);
        assert!(snapshot.delete_milestone("b"));
        assert_eq!(snapshot.milestones.len(), 2);
    }

    #[test]
    fn test_resolve_view_falls_back_to_dashboard() {
        let mut snapshot = snapshot_abc();
        snapshot.set_last_view(ViewState::milestone("b"));
        assert_eq!(snapshot.resolve_view(), ViewState::milestone("b"));

        snapshot.milestones.retain(|m| m.id != "b");
        assert_eq!(snapshot.resolve_view(), ViewState::Dashboard);
    }

    #[test]
    fn test_delete_resets_last_view_to_dashboard() {
        let mut snapshot = snapshot_abc();
        snapshot.set_last_view(ViewState::milestone("c"));
        snapshot.delete_milestone("c");
        assert_eq!(snapshot.last_view, ViewState::Dashboard);
    }
}
