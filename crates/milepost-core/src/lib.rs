//! Milepost Core
//!
//! Pure domain layer shared by the browser frontend and the HTTP service:
//! - domain: entities, derived lifecycle, progress rules
//! - snapshot: the whole-document working set and its operations
//! - migrate: key-value schema migration across storage generations
//! - reorder: drag-to-reorder mathematics (no DOM access)
//! - summary: milestone statistics and the reflection prompt
//! - seed: built-in sample data for first runs
//!
//! This crate has no async, no I/O, and no web dependencies.

mod entity;
pub mod domain;
pub mod migrate;
pub mod reorder;
pub mod seed;
pub mod snapshot;
pub mod summary;

pub use entity::{new_id, DomainError, DomainResult, Entity};
pub use domain::{
    Goal, Milestone, MilestoneStatus, Note, Progress, Subtask, SyncStatus, Task, TaskStatus,
    ViewState,
};
pub use migrate::{migrate, KeyStore, MigrationOutcome};
pub use snapshot::{Snapshot, TrackerUpdate};
