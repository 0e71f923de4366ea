//! Domain Layer
//!
//! Entities and the rules derived from them. Serialization uses camelCase
//! field names so the wire format matches the stored JSON documents.

mod milestone;
mod note;
mod task;
mod view;

pub use milestone::{Goal, Milestone, MilestoneStatus, Progress};
pub use note::Note;
pub use task::{Subtask, Task, TaskStatus};
pub use view::{SyncStatus, ViewState};

use serde::{Deserialize, Deserializer};

/// List fields are normalized once, at the deserialization boundary: a field
/// that is absent or explicitly `null` becomes an empty list. Call sites never
/// re-check.
pub(crate) fn null_to_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
