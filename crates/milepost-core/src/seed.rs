//! Built-in Sample Data
//!
//! Used when neither the remote store nor the local cache has anything: the
//! app comes up with one starter milestone instead of an empty screen.

use chrono::{Duration, NaiveDate};

use crate::domain::{Milestone, Subtask, Task};
use crate::entity::new_id;
use crate::snapshot::Snapshot;

/// One starter milestone spanning two weeks around today.
pub fn starter_snapshot(today: NaiveDate) -> Snapshot {
    let mut milestone = Milestone::new(
        new_id(),
        "Getting started".into(),
        today,
        today + Duration::days(13),
        chrono::Utc::now().to_rfc3339(),
    );

    milestone.tasks = vec![
        task("Finish the book on the nightstand", &["Learning", "Personal"], &[]),
        task(
            "Exercise 5 times",
            &["Health"],
            &[
                "Exercise 1",
                "Exercise 2",
                "Exercise 3",
                "Exercise 4",
                "Exercise 5",
            ],
        ),
        task("Make progress on the personal website", &["Projects", "Learning"], &[]),
        task("Plan the next quarter", &["Work", "Planning"], &[]),
        task("Write an annual reflection", &["Planning", "Personal"], &[]),
    ];

    Snapshot::new(vec![milestone])
}

fn task(title: &str, tags: &[&str], subtasks: &[&str]) -> Task {
    let mut task = Task::new(new_id(), title.into());
    task.tags = tags.iter().map(|t| t.to_string()).collect();
    task.subtasks = subtasks
        .iter()
        .map(|title| Subtask::new(new_id(), title.to_string()))
        .collect();
    task
}

/// Tag suggestions offered by the tag editor before the user has any of
/// their own.
pub const DEFAULT_TAGS: &[&str] = &[
    "Learning",
    "Health",
    "Projects",
    "Work",
    "Personal",
    "Planning",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_snapshot_is_valid() {
        let snapshot = starter_snapshot("2026-02-01".parse().unwrap());
        assert_eq!(snapshot.milestones.len(), 1);
        let m = &snapshot.milestones[0];
        m.validate().unwrap();
        assert_eq!(m.end_date.to_string(), "2026-02-14");
        assert!(m.tasks.iter().any(|t| !t.subtasks.is_empty()));
    }
}
