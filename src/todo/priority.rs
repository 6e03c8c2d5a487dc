use serde::{Deserialize, Serialize};

use super::entity::{Entity, PriorityId};

/// Color given to priorities created without an explicit one
pub const DEFAULT_PRIORITY_COLOR: &str = "#fff";

/// User-defined urgency label
///
/// `color` is carried for display only; filtering never looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Priority {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PriorityId>,
    pub title: String,
    pub color: String,
}

impl Default for Priority {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            color: DEFAULT_PRIORITY_COLOR.to_string(),
        }
    }
}

impl Priority {
    pub fn new(title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            color: color.into(),
        }
    }
}

impl Entity for Priority {
    fn id(&self) -> Option<u32> {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = Some(id);
    }
}
