//! Storage Schema Migration
//!
//! The on-device and remote layouts went through three generations:
//!
//! 1. single goal: separate keys for a flat task list, one goal object, and
//!    a flat notes list
//! 2. multi-milestone, un-namespaced: one milestones array plus a last-view
//!    key shared globally
//! 3. current: milestones and last-view keyed per storage namespace
//!
//! `migrate` upgrades whatever it finds to generation 3. It runs on every
//! load, is idempotent, and never removes a legacy key; source data outlives
//! the migration and its deletion is a separate, explicit operation.

use chrono::Utc;

use crate::domain::{Goal, Milestone, Note, Task};
use crate::entity::new_id;
use crate::snapshot::Snapshot;

/// Minimal key-value surface the engine runs against: browser localStorage
/// on the client, plain maps in tests.
pub trait KeyStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Key layout for all three generations
pub mod keys {
    /// Generation 1: flat task list
    pub const LEGACY_TASKS: &str = "milepost-tasks";
    /// Generation 1: single goal object
    pub const LEGACY_GOAL: &str = "milepost-goal";
    /// Generation 1: flat standalone notes list
    pub const LEGACY_NOTES: &str = "milepost-notes";
    /// Generation 1: cached reflection text
    pub const LEGACY_SUMMARY: &str = "milepost-summary";
    /// Generation 2: un-namespaced milestones array
    pub const UNSCOPED_MILESTONES: &str = "milepost-milestones";
    /// Generation 2: un-namespaced last view
    pub const UNSCOPED_LAST_VIEW: &str = "milepost-last-view";

    pub fn milestones(namespace: &str) -> String {
        format!("milepost:{}:milestones", namespace)
    }

    pub fn last_view(namespace: &str) -> String {
        format!("milepost:{}:last-view", namespace)
    }

    /// Cached reflection text, keyed by milestone id so a milestone delete
    /// can take its summary with it
    pub fn summary(namespace: &str, milestone_id: &str) -> String {
        format!("milepost:{}:summary:{}", namespace, milestone_id)
    }
}

/// What the engine found and did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Current-generation data already present; nothing touched
    AlreadyCurrent,
    /// Generation-2 data copied under the namespaced keys as-is
    AdoptedUnscoped,
    /// Generation-1 data wrapped into one synthetic milestone
    WrappedLegacy,
    /// No data anywhere; wrote an empty current-generation record
    Fresh,
}

/// Upgrade `store` to the current generation for `namespace`.
///
/// Malformed data at any generation is treated as absent rather than fatal;
/// the app must come up usable regardless of what is in storage.
pub fn migrate(store: &mut dyn KeyStore, namespace: &str) -> MigrationOutcome {
    let current_key = keys::milestones(namespace);
    if store.get(&current_key).is_some() {
        return MigrationOutcome::AlreadyCurrent;
    }

    // Generation 2: adopt the un-namespaced record wholesale.
    if let Some(raw) = store.get(keys::UNSCOPED_MILESTONES) {
        if serde_json::from_str::<Vec<Milestone>>(&raw).is_ok() {
            store.set(&current_key, &raw);
            if let Some(view) = store.get(keys::UNSCOPED_LAST_VIEW) {
                store.set(&keys::last_view(namespace), &view);
            }
            return MigrationOutcome::AdoptedUnscoped;
        }
    }

    // Generation 1: wrap the flat task/goal/notes keys into one milestone.
    let legacy_tasks = read_json::<Vec<Task>>(store, keys::LEGACY_TASKS);
    let legacy_goal = read_json::<Goal>(store, keys::LEGACY_GOAL);
    let legacy_notes = read_json::<Vec<Note>>(store, keys::LEGACY_NOTES);
    if legacy_tasks.is_some() || legacy_goal.is_some() || legacy_notes.is_some() {
        let goal = legacy_goal.unwrap_or_else(default_goal);
        let milestone = wrap_legacy(
            goal,
            legacy_tasks.unwrap_or_default(),
            legacy_notes.unwrap_or_default(),
        );
        if let Some(summary) = store.get(keys::LEGACY_SUMMARY) {
            store.set(&keys::summary(namespace, &milestone.id), &summary);
        }
        let serialized = serde_json::to_string(&vec![milestone]).unwrap_or_else(|_| "[]".into());
        store.set(&current_key, &serialized);
        return MigrationOutcome::WrappedLegacy;
    }

    store.set(&current_key, "[]");
    MigrationOutcome::Fresh
}

/// Synthesize a current-generation milestone from generation-1 parts: title
/// and dates come from the goal, the lists carry over untouched, and the id
/// and capture time are fresh.
pub fn wrap_legacy(goal: Goal, tasks: Vec<Task>, notes: Vec<Note>) -> Milestone {
    let mut milestone = Milestone::new(
        new_id(),
        goal.title,
        goal.start_date,
        goal.end_date,
        Utc::now().to_rfc3339(),
    );
    milestone.tasks = tasks;
    milestone.standalone_notes = notes;
    milestone
}

/// Load the current-generation snapshot for a namespace. Absent or malformed
/// entries read as empty.
pub fn load_snapshot(store: &dyn KeyStore, namespace: &str) -> Snapshot {
    let milestones = store
        .get(&keys::milestones(namespace))
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default();
    let last_view = store
        .get(&keys::last_view(namespace))
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default();
    Snapshot {
        milestones,
        last_view,
    }
}

/// Write the snapshot back under the current-generation keys.
pub fn save_snapshot(store: &mut dyn KeyStore, namespace: &str, snapshot: &Snapshot) {
    if let Ok(raw) = serde_json::to_string(&snapshot.milestones) {
        store.set(&keys::milestones(namespace), &raw);
    }
    if let Ok(raw) = serde_json::to_string(&snapshot.last_view) {
        store.set(&keys::last_view(namespace), &raw);
    }
}

/// Drop per-milestone artifacts (the cached summary) after a milestone
/// delete. The milestone itself is removed from the snapshot by the caller.
pub fn remove_milestone_artifacts(store: &mut dyn KeyStore, namespace: &str, milestone_id: &str) {
    store.remove(&keys::summary(namespace, milestone_id));
}

fn read_json<T: serde::de::DeserializeOwned>(store: &dyn KeyStore, key: &str) -> Option<T> {
    store.get(key).and_then(|raw| serde_json::from_str(&raw).ok())
}

fn default_goal() -> Goal {
    let today = Utc::now().date_naive();
    Goal {
        title: "My goals".into(),
        start_date: today,
        end_date: today + chrono::Duration::days(30),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Subtask, TaskStatus, ViewState};
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore(HashMap<String, String>);

    impl KeyStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }
        fn set(&mut self, key: &str, value: &str) {
            self.0.insert(key.to_string(), value.to_string());
        }
        fn remove(&mut self, key: &str) {
            self.0.remove(key);
        }
    }

    fn legacy_store() -> MemoryStore {
        let mut store = MemoryStore::default();
        store.set(
            keys::LEGACY_TASKS,
            r#"[{"id":"1","title":"Exercise 5 times","status":"in_progress",
                 "tags":["Health"],"dueDate":null,
                 "subtasks":[{"id":"1-1","title":"Exercise 1","status":"complete"}],
                 "notes":[]}]"#,
        );
        store.set(
            keys::LEGACY_GOAL,
            r#"{"title":"Winter goals","startDate":"2025-12-21","endDate":"2026-01-07"}"#,
        );
        store.set(
            keys::LEGACY_NOTES,
            r#"[{"id":"n1","content":"Great start","date":"2025-12-22",
                 "createdAt":"2025-12-22T08:00:00Z"}]"#,
        );
        store.set(keys::LEGACY_SUMMARY, "A warm reflection.");
        store
    }

    #[test]
    fn test_fresh_store_gets_an_empty_record() {
        let mut store = MemoryStore::default();
        assert_eq!(migrate(&mut store, "default"), MigrationOutcome::Fresh);
        assert_eq!(store.get(&keys::milestones("default")).unwrap(), "[]");
    }

    #[test]
    fn test_legacy_wrap_is_lossless() {
        let mut store = legacy_store();
        assert_eq!(migrate(&mut store, "default"), MigrationOutcome::WrappedLegacy);

        let snapshot = load_snapshot(&store, "default");
        assert_eq!(snapshot.milestones.len(), 1);
        let m = &snapshot.milestones[0];
        assert!(!m.id.is_empty());
        assert_eq!(m.title, "Winter goals");
        assert_eq!(m.start_date.to_string(), "2025-12-21");
        assert_eq!(m.end_date.to_string(), "2026-01-07");
        assert_eq!(m.tasks.len(), 1);
        assert_eq!(m.tasks[0].status, TaskStatus::InProgress);
        assert_eq!(m.tasks[0].subtasks[0].id, "1-1");
        assert_eq!(m.standalone_notes.len(), 1);
        assert_eq!(m.standalone_notes[0].content, "Great start");

        // The cached summary follows the synthesized milestone's id.
        assert_eq!(
            store.get(&keys::summary("default", &m.id)).as_deref(),
            Some("A warm reflection.")
        );
    }

    #[test]
    fn test_migration_is_idempotent() {
        let mut store = legacy_store();
        migrate(&mut store, "default");
        let first = store.get(&keys::milestones("default")).unwrap();

        assert_eq!(migrate(&mut store, "default"), MigrationOutcome::AlreadyCurrent);
        let second = store.get(&keys::milestones("default")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_migration_leaves_legacy_keys_in_place() {
        let mut store = legacy_store();
        migrate(&mut store, "default");
        assert!(store.get(keys::LEGACY_TASKS).is_some());
        assert!(store.get(keys::LEGACY_GOAL).is_some());
        assert!(store.get(keys::LEGACY_NOTES).is_some());
        assert!(store.get(keys::LEGACY_SUMMARY).is_some());
    }

    #[test]
    fn test_unscoped_generation_is_adopted_as_is() {
        let mut store = MemoryStore::default();
        let raw = r#"[{"id":"m1","title":"Q1","startDate":"2026-01-01","endDate":"2026-03-31",
                       "createdAt":"2025-12-28T10:00:00Z","tasks":[],"standaloneNotes":[]}]"#;
        store.set(keys::UNSCOPED_MILESTONES, raw);
        store.set(keys::UNSCOPED_LAST_VIEW, r#"{"kind":"milestone","milestoneId":"m1"}"#);

        assert_eq!(migrate(&mut store, "default"), MigrationOutcome::AdoptedUnscoped);
        let snapshot = load_snapshot(&store, "default");
        assert_eq!(snapshot.milestones[0].id, "m1");
        assert_eq!(snapshot.last_view, ViewState::milestone("m1"));
        // Source keys survive.
        assert!(store.get(keys::UNSCOPED_MILESTONES).is_some());
    }

    #[test]
    fn test_malformed_data_reads_as_empty() {
        let mut store = MemoryStore::default();
        store.set(keys::UNSCOPED_MILESTONES, "{not json");
        store.set(keys::LEGACY_TASKS, "also not json");
        // Malformed generation-2 data is skipped; malformed generation-1
        // tasks still trigger a wrap with whatever parses (here: nothing).
        assert_eq!(migrate(&mut store, "default"), MigrationOutcome::Fresh);
        let snapshot = load_snapshot(&store, "default");
        assert!(snapshot.milestones.is_empty());
    }

    #[test]
    fn test_cascade_delete_leaves_no_residue() {
        let mut store = MemoryStore::default();
        let mut milestone = Milestone::new(
            "m1".into(),
            "Trip".into(),
            "2026-01-01".parse().unwrap(),
            "2026-02-15".parse().unwrap(),
            "2025-12-01T10:00:00Z".into(),
        );
        for t in 0..3 {
            let mut task = Task::new(format!("t{}", t), format!("Task {}", t));
            for s in 0..2 {
                task.subtasks
                    .push(Subtask::new(format!("t{}-s{}", t, s), "Step".into()));
            }
            task.notes.push(Note::new(
                format!("t{}-n0", t),
                "note".into(),
                "2026-01-05".parse().unwrap(),
                "2026-01-05T09:00:00Z".into(),
            ));
            milestone.tasks.push(task);
        }
        milestone.standalone_notes.push(Note::new(
            "sn1".into(),
            "journal".into(),
            "2026-01-06".parse().unwrap(),
            "2026-01-06T09:00:00Z".into(),
        ));

        let mut snapshot = Snapshot::new(vec![milestone]);
        save_snapshot(&mut store, "default", &snapshot);
        store.set(&keys::summary("default", "m1"), "cached text");

        assert!(snapshot.delete_milestone("m1"));
        remove_milestone_artifacts(&mut store, "default", "m1");
        save_snapshot(&mut store, "default", &snapshot);

        assert!(store.get(&keys::summary("default", "m1")).is_none());
        let raw = store.get(&keys::milestones("default")).unwrap();
        assert!(!raw.contains("m1"));
        assert_eq!(load_snapshot(&store, "default").milestones.len(), 0);
    }
}
