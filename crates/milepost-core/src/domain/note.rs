//! Note Entity
//!
//! Journal entries, attached either to a task or directly to a milestone
//! ("standalone"). The attachment point is the only difference.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub content: String,
    /// What the note is about; user-editable so entries can be backdated
    pub date: NaiveDate,
    /// Capture time, immutable after creation (RFC 3339)
    pub created_at: String,
}

impl Note {
    pub fn new(id: String, content: String, date: NaiveDate, created_at: String) -> Self {
        Self {
            id,
            content,
            date,
            created_at,
        }
    }
}

impl Entity for Note {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}
