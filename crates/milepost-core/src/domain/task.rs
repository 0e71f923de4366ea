//! Task and Subtask Entities

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::note::Note;
use super::null_to_empty;
use crate::entity::Entity;

/// Tri-state progress marker shared by tasks and subtasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Complete,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "not_started",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Complete => "complete",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "in_progress" => TaskStatus::InProgress,
            "complete" => TaskStatus::Complete,
            _ => TaskStatus::NotStarted,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, TaskStatus::Complete)
    }

    /// A tap on the status button toggles between complete and not-started.
    pub fn toggled_tap(self) -> Self {
        match self {
            TaskStatus::Complete => TaskStatus::NotStarted,
            _ => TaskStatus::Complete,
        }
    }

    /// A long press toggles between in-progress and not-started.
    pub fn toggled_hold(self) -> Self {
        match self {
            TaskStatus::InProgress => TaskStatus::NotStarted,
            _ => TaskStatus::InProgress,
        }
    }
}

/// A leaf checklist item under a task; no further nesting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
}

impl Subtask {
    pub fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            status: TaskStatus::NotStarted,
        }
    }
}

impl Entity for Subtask {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

/// A trackable unit of work owned by exactly one milestone
///
/// Position within the parent's `tasks` array is the user-controlled display
/// order; every operation that is not an explicit reorder must preserve it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    /// Display tags, insertion order preserved, no semantic ordering
    #[serde(default, deserialize_with = "null_to_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub subtasks: Vec<Subtask>,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub notes: Vec<Note>,
}

impl Task {
    pub fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            status: TaskStatus::NotStarted,
            tags: Vec::new(),
            due_date: None,
            subtasks: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn completed_subtasks(&self) -> usize {
        self.subtasks
            .iter()
            .filter(|s| s.status.is_complete())
            .count()
    }

    /// Progress items contributed by this task: the task itself counts as one
    /// item alongside each of its subtasks.
    pub fn item_counts(&self) -> (usize, usize) {
        let total = 1 + self.subtasks.len();
        let completed = usize::from(self.status.is_complete()) + self.completed_subtasks();
        (completed, total)
    }

    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.due_date == Some(date)
    }
}

impl Entity for Task {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        assert_eq!(TaskStatus::InProgress.as_str(), "in_progress");
        assert_eq!(TaskStatus::from_str("complete"), TaskStatus::Complete);
        assert_eq!(TaskStatus::from_str("anything"), TaskStatus::NotStarted);
    }

    #[test]
    fn test_tap_and_hold_toggles() {
        assert_eq!(TaskStatus::NotStarted.toggled_tap(), TaskStatus::Complete);
        assert_eq!(TaskStatus::Complete.toggled_tap(), TaskStatus::NotStarted);
        assert_eq!(TaskStatus::InProgress.toggled_tap(), TaskStatus::Complete);
        assert_eq!(TaskStatus::NotStarted.toggled_hold(), TaskStatus::InProgress);
        assert_eq!(TaskStatus::InProgress.toggled_hold(), TaskStatus::NotStarted);
        assert_eq!(TaskStatus::Complete.toggled_hold(), TaskStatus::InProgress);
    }

    #[test]
    fn test_item_counts_include_the_task_itself() {
        let mut task = Task::new("t1".into(), "Run".into());
        task.subtasks.push(Subtask::new("s1".into(), "Week 1".into()));
        task.subtasks.push(Subtask::new("s2".into(), "Week 2".into()));
        task.subtasks[0].status = TaskStatus::Complete;
        assert_eq!(task.item_counts(), (1, 3));

        task.status = TaskStatus::Complete;
        assert_eq!(task.item_counts(), (2, 3));
    }

    #[test]
    fn test_null_lists_normalize_to_empty() {
        let task: Task = serde_json::from_str(
            r#"{"id":"t1","title":"Pack","status":"not_started","tags":null,"subtasks":null,"notes":null}"#,
        )
        .unwrap();
        assert!(task.tags.is_empty());
        assert!(task.subtasks.is_empty());
        assert!(task.notes.is_empty());
        assert_eq!(task.due_date, None);
    }
}
