//! Task filter predicates
//!
//! Each criterion is an independent predicate over a single task. A
//! `TaskFilter` combines the four with logical AND; any criterion left unset
//! places no restriction. Filtering keeps the relative order of its input
//! and never sorts.

use serde::{Deserialize, Serialize};

use super::entity::PriorityId;
use super::scope::CategoryScope;
use super::task::Task;

/// Current filter state: category scope, search text, status and priority
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskFilter {
    /// Category restriction (`All` = none)
    pub category: CategoryScope,
    /// Case-insensitive title substring; blank = none
    pub search_text: String,
    /// `Some(true)` = completed only, `Some(false)` = uncompleted only
    pub status: Option<bool>,
    /// Priority restriction (`None` = none)
    pub priority: Option<PriorityId>,
}

impl TaskFilter {
    /// Filter that lets every task through
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: CategoryScope) -> Self {
        self.category = category;
        self
    }

    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_status(mut self, status: Option<bool>) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Option<PriorityId>) -> Self {
        self.priority = priority;
        self
    }

    /// Check whether no criterion is set
    pub fn is_identity(&self) -> bool {
        self.category.is_all()
            && normalize_search_text(&self.search_text).is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }

    /// Check a single task against every criterion
    pub fn matches(&self, task: &Task) -> bool {
        self.criteria().iter().all(|criterion| criterion.matches(task))
    }

    /// The set criteria of this filter, in no meaningful order
    pub fn criteria(&self) -> Vec<Criterion> {
        let mut criteria = Vec::with_capacity(4);
        if let CategoryScope::Category(_) = self.category {
            criteria.push(Criterion::Category(self.category));
        }
        if let Some(needle) = normalize_search_text(&self.search_text) {
            criteria.push(Criterion::Text(needle));
        }
        if let Some(status) = self.status {
            criteria.push(Criterion::Status(status));
        }
        if let Some(priority) = self.priority {
            criteria.push(Criterion::Priority(priority));
        }
        criteria
    }
}

/// One independent filter criterion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    Category(CategoryScope),
    /// Already trimmed and lowercased
    Text(String),
    Status(bool),
    Priority(PriorityId),
}

impl Criterion {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Criterion::Category(scope) => scope.contains(task.category),
            Criterion::Text(needle) => task.title.to_lowercase().contains(needle.as_str()),
            Criterion::Status(completed) => task.completed == *completed,
            Criterion::Priority(id) => task.priority == Some(*id),
        }
    }

    /// Retain only the tasks this criterion accepts
    pub fn apply(&self, tasks: &mut Vec<Task>) {
        tasks.retain(|task| self.matches(task));
    }
}

/// Trim and lowercase search text, `None` when nothing is left
pub fn normalize_search_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Compute the visible subset of `tasks` under `filter`
///
/// Order is preserved. With no criterion set the input comes back unchanged.
pub fn filter_tasks(tasks: &[Task], filter: &TaskFilter) -> Vec<Task> {
    let criteria = filter.criteria();
    tasks
        .iter()
        .filter(|task| criteria.iter().all(|criterion| criterion.matches(task)))
        .cloned()
        .collect()
}
