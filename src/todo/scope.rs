use serde::{Deserialize, Serialize};

use super::category::Category;
use super::entity::CategoryId;
use crate::error::{TodoError, TodoResult};

/// Category selection used by filters and statistics
///
/// `All` is the "all categories" sentinel and places no restriction at all,
/// uncategorized tasks included. It is not the same thing as a task having
/// no category (`Task::category == None`), which only ever matches `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryScope {
    #[default]
    All,
    Category(CategoryId),
}

impl CategoryScope {
    /// Scope restricted to a stored category
    ///
    /// # Errors
    /// `InvalidArgument` when the category has not been stored yet
    pub fn of(category: &Category) -> TodoResult<Self> {
        category.id.map(CategoryScope::Category).ok_or_else(|| {
            TodoError::InvalidArgument(format!(
                "category '{}' has no id and cannot be used as a scope",
                category.title
            ))
        })
    }

    /// Check whether a task category reference falls inside this scope
    pub fn contains(&self, category: Option<CategoryId>) -> bool {
        match self {
            CategoryScope::All => true,
            CategoryScope::Category(id) => category == Some(*id),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryScope::All)
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        match self {
            CategoryScope::All => None,
            CategoryScope::Category(id) => Some(*id),
        }
    }
}
