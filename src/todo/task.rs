use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity::{CategoryId, Entity, PriorityId, TaskId};

/// A single to-do item
///
/// `category` and `priority` hold the id of the referenced entity. An absent
/// reference means "uncategorized" / "no priority". A reference to an entity
/// that no longer exists is tolerated and treated like an absent one by the
/// data store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    /// Store-assigned identifier, `None` until the task has been added
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    /// Text shown in the task list and matched by search
    pub title: String,
    /// Completion flag
    pub completed: bool,
    /// Optional priority reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<PriorityId>,
    /// Optional category reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    /// Optional due date (format: YYYY-MM-DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            completed: false,
            priority: None,
            category: None,
            date: None,
        }
    }
}

impl Task {
    /// Create a new, not yet stored, uncompleted task
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the category reference
    pub fn with_category(mut self, category: Option<CategoryId>) -> Self {
        self.category = category;
        self
    }

    /// Set the priority reference
    pub fn with_priority(mut self, priority: Option<PriorityId>) -> Self {
        self.priority = priority;
        self
    }

    /// Set the completion flag
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Set the due date
    pub fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    /// Flip the completion flag
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

impl Entity for Task {
    fn id(&self) -> Option<u32> {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = Some(id);
    }
}
