use std::collections::HashSet;

use super::category::Category;
use super::entity::{CategoryId, Entity, PriorityId, TaskId};
use super::filter::{TaskFilter, filter_tasks, normalize_search_text};
use super::priority::Priority;
use super::scope::CategoryScope;
use super::stats::TaskStats;
use super::task::Task;
use crate::error::{EntityKind, TodoError, TodoResult};

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoData {
    /// Format version for the TOML file (current: 1)
    pub format_version: u32,

    /// All tasks in insertion order
    ///
    /// Insertion order is the order searches return; nothing here sorts.
    pub(crate) tasks: Vec<Task>,

    pub(crate) categories: Vec<Category>,

    pub(crate) priorities: Vec<Priority>,

    /// Last id handed out per entity kind
    pub task_counter: u32,
    pub category_counter: u32,
    pub priority_counter: u32,
}

impl Default for TodoData {
    fn default() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            tasks: Vec::new(),
            categories: Vec::new(),
            priorities: Vec::new(),
            task_counter: 0,
            category_counter: 0,
            priority_counter: 0,
        }
    }
}

// Serialize/Deserialize implementations are in serde_impl.rs

impl TodoData {
    /// Create a new empty TodoData instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn priorities(&self) -> &[Priority] {
        &self.priorities
    }

    fn next_task_id(&mut self) -> TodoResult<TaskId> {
        next_id(&mut self.task_counter, EntityKind::Task)
    }

    fn next_category_id(&mut self) -> TodoResult<CategoryId> {
        next_id(&mut self.category_counter, EntityKind::Category)
    }

    fn next_priority_id(&mut self) -> TodoResult<PriorityId> {
        next_id(&mut self.priority_counter, EntityKind::Priority)
    }

    // Task operations

    /// Find a task by its ID
    pub fn find_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == Some(id))
    }

    /// Store a new task and return it with its assigned ID
    ///
    /// Any ID already present on `task` is replaced.
    pub fn add_task(&mut self, mut task: Task) -> TodoResult<Task> {
        task.id = Some(self.next_task_id()?);
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Replace a stored task in place
    ///
    /// # Returns
    /// The previous version if a task with the same ID existed
    pub fn update_task(&mut self, task: Task) -> Option<Task> {
        let id = task.id?;
        let slot = self.tasks.iter_mut().find(|t| t.id == Some(id))?;
        Some(std::mem::replace(slot, task))
    }

    /// Remove a task and return it
    pub fn remove_task(&mut self, id: TaskId) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| t.id == Some(id))?;
        Some(self.tasks.remove(pos))
    }

    // Category operations

    pub fn find_category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == Some(id))
    }

    pub fn add_category(&mut self, title: impl Into<String>) -> TodoResult<Category> {
        let category = Category {
            id: Some(self.next_category_id()?),
            title: title.into(),
        };
        self.categories.push(category.clone());
        Ok(category)
    }

    pub fn update_category(&mut self, category: Category) -> Option<Category> {
        let id = category.id?;
        let slot = self.categories.iter_mut().find(|c| c.id == Some(id))?;
        Some(std::mem::replace(slot, category))
    }

    /// Remove a category and detach its tasks
    ///
    /// Tasks are kept; their category reference is cleared.
    pub fn remove_category(&mut self, id: CategoryId) -> Option<Category> {
        let pos = self.categories.iter().position(|c| c.id == Some(id))?;
        let removed = self.categories.remove(pos);
        for task in self.tasks.iter_mut() {
            if task.category == Some(id) {
                task.category = None;
            }
        }
        Some(removed)
    }

    /// Categories whose title contains `title` (case-insensitive, trimmed)
    ///
    /// Blank `title` returns every category.
    pub fn search_categories(&self, title: &str) -> Vec<Category> {
        match normalize_search_text(title) {
            None => self.categories.clone(),
            Some(needle) => self
                .categories
                .iter()
                .filter(|c| c.title.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
        }
    }

    // Priority operations

    pub fn find_priority(&self, id: PriorityId) -> Option<&Priority> {
        self.priorities.iter().find(|p| p.id == Some(id))
    }

    pub fn add_priority(
        &mut self,
        title: impl Into<String>,
        color: impl Into<String>,
    ) -> TodoResult<Priority> {
        let priority = Priority {
            id: Some(self.next_priority_id()?),
            title: title.into(),
            color: color.into(),
        };
        self.priorities.push(priority.clone());
        Ok(priority)
    }

    pub fn update_priority(&mut self, priority: Priority) -> Option<Priority> {
        let id = priority.id?;
        let slot = self.priorities.iter_mut().find(|p| p.id == Some(id))?;
        Some(std::mem::replace(slot, priority))
    }

    /// Remove a priority and clear it from every task that used it
    pub fn remove_priority(&mut self, id: PriorityId) -> Option<Priority> {
        let pos = self.priorities.iter().position(|p| p.id == Some(id))?;
        let removed = self.priorities.remove(pos);
        for task in self.tasks.iter_mut() {
            if task.priority == Some(id) {
                task.priority = None;
            }
        }
        Some(removed)
    }

    // Queries

    /// Copy of all tasks with dangling references cleared
    ///
    /// A category or priority reference to an entity that does not exist is
    /// treated as no reference at all. Stored tasks are left untouched.
    pub fn resolved_tasks(&self) -> Vec<Task> {
        self.tasks.iter().map(|task| self.resolve(task)).collect()
    }

    /// A single task with dangling references cleared
    pub fn resolved_task(&self, id: TaskId) -> Option<Task> {
        self.find_task(id).map(|task| self.resolve(task))
    }

    fn resolve(&self, task: &Task) -> Task {
        let mut task = task.clone();
        if let Some(id) = task.category
            && self.find_category(id).is_none()
        {
            task.category = None;
        }
        if let Some(id) = task.priority
            && self.find_priority(id).is_none()
        {
            task.priority = None;
        }
        task
    }

    /// Tasks visible under `filter`, in insertion order
    pub fn search_tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        filter_tasks(&self.resolved_tasks(), filter)
    }

    /// Statistics for `scope`
    pub fn stats(&self, scope: &CategoryScope) -> TaskStats {
        TaskStats::compute(&self.resolved_tasks(), scope)
    }

    /// Raise counters past every stored ID and give ID-less entities one
    ///
    /// Used after loading data that may have been edited by hand. An ID
    /// already taken by an earlier entity of the same kind is replaced.
    pub(crate) fn repair_ids(&mut self) -> TodoResult<()> {
        repair_entity_ids(&mut self.tasks, &mut self.task_counter, EntityKind::Task)?;
        repair_entity_ids(
            &mut self.categories,
            &mut self.category_counter,
            EntityKind::Category,
        )?;
        repair_entity_ids(
            &mut self.priorities,
            &mut self.priority_counter,
            EntityKind::Priority,
        )
    }
}

fn next_id(counter: &mut u32, kind: EntityKind) -> TodoResult<u32> {
    let id = counter
        .checked_add(1)
        .ok_or(TodoError::IdsExhausted(kind))?;
    *counter = id;
    Ok(id)
}

fn repair_entity_ids<T: Entity>(
    items: &mut [T],
    counter: &mut u32,
    kind: EntityKind,
) -> TodoResult<()> {
    let max_id = items.iter().filter_map(Entity::id).max().unwrap_or(0);
    *counter = (*counter).max(max_id);

    let mut seen = HashSet::new();
    for item in items.iter_mut() {
        match item.id() {
            Some(id) if seen.insert(id) => {}
            _ => {
                let id = next_id(counter, kind)?;
                seen.insert(id);
                item.set_id(id);
            }
        }
    }
    Ok(())
}
