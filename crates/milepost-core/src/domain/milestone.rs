//! Milestone Entity
//!
//! A time-boxed goal container. Lifecycle status is derived from the date
//! range and today's date, never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::note::Note;
use super::null_to_empty;
use super::task::Task;
use crate::entity::{DomainError, DomainResult, Entity};

/// Derived lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneStatus {
    Upcoming,
    Active,
    Complete,
}

/// Completion counts over tasks and their subtasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub completed_items: usize,
    pub total_items: usize,
}

impl Progress {
    pub fn percent(&self) -> u32 {
        if self.total_items == 0 {
            return 0;
        }
        ((self.completed_items as f64 / self.total_items as f64) * 100.0).round() as u32
    }
}

/// Title and date range of a milestone, detached from its contents
///
/// This is both the legacy single-goal storage shape and the `goal` field of
/// a summary request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Capture time at creation (RFC 3339), immutable
    pub created_at: String,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub tasks: Vec<Task>,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub standalone_notes: Vec<Note>,
}

impl Milestone {
    pub fn new(
        id: String,
        title: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        created_at: String,
    ) -> Self {
        Self {
            id,
            title,
            start_date,
            end_date,
            created_at,
            tasks: Vec::new(),
            standalone_notes: Vec::new(),
        }
    }

    pub fn goal(&self) -> Goal {
        Goal {
            title: self.title.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    /// Derived status: upcoming before the range, complete after it, active
    /// inside it (boundary days inclusive).
    pub fn status_on(&self, today: NaiveDate) -> MilestoneStatus {
        if today < self.start_date {
            MilestoneStatus::Upcoming
        } else if today > self.end_date {
            MilestoneStatus::Complete
        } else {
            MilestoneStatus::Active
        }
    }

    pub fn total_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.end_date - today).num_days()
    }

    /// Progress over all tasks, each task counting itself plus its subtasks
    pub fn progress(&self) -> Progress {
        let mut progress = Progress::default();
        for task in &self.tasks {
            let (completed, total) = task.item_counts();
            progress.completed_items += completed;
            progress.total_items += total;
        }
        progress
    }

    /// Union of tags across tasks, first-seen order preserved
    pub fn all_tags(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut tags = Vec::new();
        for task in &self.tasks {
            for tag in &task.tags {
                if seen.insert(tag.clone()) {
                    tags.push(tag.clone());
                }
            }
        }
        tags
    }

    pub fn note_count(&self) -> usize {
        self.tasks.iter().map(|t| t.notes.len()).sum::<usize>() + self.standalone_notes.len()
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Check the date range and id uniqueness at every nesting level.
    /// Collisions are reported, never silently resolved.
    pub fn validate(&self) -> DomainResult<()> {
        if self.end_date < self.start_date {
            return Err(DomainError::InvalidInput(format!(
                "milestone '{}' ends before it starts",
                self.title
            )));
        }
        check_unique(self.tasks.iter().map(|t| t.id.as_str()), "task")?;
        check_unique(
            self.standalone_notes.iter().map(|n| n.id.as_str()),
            "standalone note",
        )?;
        for task in &self.tasks {
            check_unique(task.subtasks.iter().map(|s| s.id.as_str()), "subtask")?;
            check_unique(task.notes.iter().map(|n| n.id.as_str()), "note")?;
        }
        Ok(())
    }
}

impl Entity for Milestone {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

fn check_unique<'a>(ids: impl Iterator<Item = &'a str>, kind: &str) -> DomainResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DomainError::Conflict(format!("duplicate {} id '{}'", kind, id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::{Subtask, TaskStatus};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn q1_milestone() -> Milestone {
        Milestone::new(
            "m1".into(),
            "Q1".into(),
            date("2026-01-01"),
            date("2026-03-31"),
            "2025-12-28T10:00:00Z".into(),
        )
    }

    #[test]
    fn test_status_is_derived_from_the_date_range() {
        let m = q1_milestone();
        assert_eq!(m.status_on(date("2025-12-31")), MilestoneStatus::Upcoming);
        assert_eq!(m.status_on(date("2026-01-01")), MilestoneStatus::Active);
        assert_eq!(m.status_on(date("2026-02-15")), MilestoneStatus::Active);
        assert_eq!(m.status_on(date("2026-03-31")), MilestoneStatus::Active);
        assert_eq!(m.status_on(date("2026-04-01")), MilestoneStatus::Complete);
    }

    #[test]
    fn test_status_ignores_task_completion() {
        let mut m = q1_milestone();
        let mut task = Task::new("t1".into(), "Run 100 miles".into());
        for i in 0..3 {
            task.subtasks
                .push(Subtask::new(format!("s{}", i), format!("Leg {}", i)));
        }
        task.subtasks[0].status = TaskStatus::Complete;
        m.tasks.push(task);
        assert_eq!(m.status_on(date("2026-02-01")), MilestoneStatus::Active);
        assert_eq!(m.status_on(date("2026-04-02")), MilestoneStatus::Complete);
    }

    #[test]
    fn test_progress_counts_tasks_alongside_subtasks() {
        let mut m = q1_milestone();

        let mut first = Task::new("t1".into(), "Three-parter".into());
        for i in 0..3 {
            first
                .subtasks
                .push(Subtask::new(format!("t1-{}", i), format!("Part {}", i)));
        }
        first.subtasks[0].status = TaskStatus::Complete;
        m.tasks.push(first);

        let mut second = Task::new("t2".into(), "One-shot".into());
        second.status = TaskStatus::Complete;
        m.tasks.push(second);

        let progress = m.progress();
        assert_eq!(progress.completed_items, 2);
        assert_eq!(progress.total_items, 5);
        assert_eq!(progress.percent(), 40);
    }

    #[test]
    fn test_validate_rejects_inverted_date_range() {
        let mut m = q1_milestone();
        m.end_date = date("2025-12-01");
        assert!(matches!(m.validate(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_task_ids() {
        let mut m = q1_milestone();
        m.tasks.push(Task::new("t1".into(), "One".into()));
        m.tasks.push(Task::new("t1".into(), "Two".into()));
        assert!(matches!(m.validate(), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn test_all_tags_keeps_first_seen_order() {
        let mut m = q1_milestone();
        let mut a = Task::new("t1".into(), "A".into());
        a.tags = vec!["Health".into(), "Personal".into()];
        let mut b = Task::new("t2".into(), "B".into());
        b.tags = vec!["Personal".into(), "Learning".into()];
        m.tasks.push(a);
        m.tasks.push(b);
        assert_eq!(m.all_tags(), vec!["Health", "Personal", "Learning"]);
    }
}
