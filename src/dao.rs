//! Data access collaborator
//!
//! `DataAccess` is the persistence boundary the query orchestrator talks to.
//! Every call is async and returns a snapshot; callers never see a partially
//! applied update. `LocalStore` is the in-process implementation over
//! `TodoData`, optionally written through to a TOML file after each change.

use async_trait::async_trait;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::error::{EntityKind, TodoError, TodoResult};
use crate::storage::Storage;
use crate::todo::{
    Category, CategoryId, CategoryScope, Priority, PriorityId, Task, TaskFilter, TaskId, TodoData,
};
use crate::validation;

/// Storage interface consumed by the query orchestrator
#[async_trait]
pub trait DataAccess: Send + Sync {
    // === Queries ===

    async fn get_all_categories(&self) -> TodoResult<Vec<Category>>;

    async fn get_all_priorities(&self) -> TodoResult<Vec<Priority>>;

    /// Tasks matching every criterion of `filter`, in stored order
    async fn search_tasks(&self, filter: &TaskFilter) -> TodoResult<Vec<Task>>;

    /// Categories whose title contains `title` (case-insensitive)
    async fn search_categories(&self, title: &str) -> TodoResult<Vec<Category>>;

    async fn get_task(&self, id: TaskId) -> TodoResult<Task>;

    // === Statistics ===

    async fn get_total_count_in_category(&self, scope: &CategoryScope) -> TodoResult<usize>;

    async fn get_completed_count_in_category(&self, scope: &CategoryScope) -> TodoResult<usize>;

    async fn get_uncompleted_count_in_category(
        &self,
        scope: &CategoryScope,
    ) -> TodoResult<usize>;

    async fn get_uncompleted_total_count(&self) -> TodoResult<usize>;

    async fn get_total_count(&self) -> TodoResult<usize>;

    // === Task Operations ===

    async fn add_task(&self, task: Task) -> TodoResult<Task>;

    async fn update_task(&self, task: Task) -> TodoResult<Task>;

    async fn delete_task(&self, id: TaskId) -> TodoResult<()>;

    // === Category Operations ===

    async fn add_category(&self, title: &str) -> TodoResult<Category>;

    async fn update_category(&self, category: Category) -> TodoResult<Category>;

    /// Delete a category; its tasks lose their category reference
    async fn delete_category(&self, id: CategoryId) -> TodoResult<()>;

    // === Priority Operations ===

    async fn add_priority(&self, title: &str, color: &str) -> TodoResult<Priority>;

    async fn update_priority(&self, priority: Priority) -> TodoResult<Priority>;

    /// Delete a priority; its tasks lose their priority reference
    async fn delete_priority(&self, id: PriorityId) -> TodoResult<()>;
}

/// In-process data store over `TodoData`
pub struct LocalStore {
    data: Mutex<TodoData>,
    storage: Option<Storage>,
}

impl LocalStore {
    /// Store backed by a TOML file, loading it if present
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let storage = Storage::new(path);
        let data = storage.load()?;
        info!(
            path = %storage.path().display(),
            tasks = data.tasks().len(),
            "data store opened"
        );
        Ok(Self {
            data: Mutex::new(data),
            storage: Some(storage),
        })
    }

    /// Store that keeps everything in memory only
    pub fn in_memory() -> Self {
        Self::with_data(TodoData::new())
    }

    pub fn with_data(data: TodoData) -> Self {
        Self {
            data: Mutex::new(data),
            storage: None,
        }
    }

    /// Copy of the current data set
    pub fn snapshot(&self) -> TodoResult<TodoData> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> TodoResult<MutexGuard<'_, TodoData>> {
        self.data
            .lock()
            .map_err(|_| TodoError::Collaborator("data lock poisoned".to_string()))
    }

    /// Apply a mutation and persist the result
    ///
    /// When persisting fails the in-memory data is rolled back, so memory and
    /// file never disagree.
    fn mutate<T>(&self, op: impl FnOnce(&mut TodoData) -> TodoResult<T>) -> TodoResult<T> {
        let mut data = self.lock()?;
        let before = data.clone();
        let result = op(&mut *data)?;
        if let Some(storage) = &self.storage
            && let Err(e) = storage.save(&data)
        {
            warn!(error = %format!("{:#}", e), "failed to persist change, rolling back");
            *data = before;
            return Err(e.into());
        }
        Ok(result)
    }

    fn check_references(
        data: &TodoData,
        category: Option<CategoryId>,
        priority: Option<PriorityId>,
    ) -> TodoResult<()> {
        if let Some(id) = category
            && data.find_category(id).is_none()
        {
            return Err(TodoError::not_found(EntityKind::Category, id));
        }
        if let Some(id) = priority
            && data.find_priority(id).is_none()
        {
            return Err(TodoError::not_found(EntityKind::Priority, id));
        }
        Ok(())
    }
}

fn require_id(kind: EntityKind, id: Option<u32>) -> TodoResult<u32> {
    id.ok_or_else(|| TodoError::InvalidArgument(format!("{} has no id; add it first", kind)))
}

#[async_trait]
impl DataAccess for LocalStore {
    async fn get_all_categories(&self) -> TodoResult<Vec<Category>> {
        Ok(self.lock()?.categories().to_vec())
    }

    async fn get_all_priorities(&self) -> TodoResult<Vec<Priority>> {
        Ok(self.lock()?.priorities().to_vec())
    }

    async fn search_tasks(&self, filter: &TaskFilter) -> TodoResult<Vec<Task>> {
        Ok(self.lock()?.search_tasks(filter))
    }

    async fn search_categories(&self, title: &str) -> TodoResult<Vec<Category>> {
        Ok(self.lock()?.search_categories(title))
    }

    async fn get_task(&self, id: TaskId) -> TodoResult<Task> {
        self.lock()?
            .resolved_task(id)
            .ok_or_else(|| TodoError::not_found(EntityKind::Task, id))
    }

    async fn get_total_count_in_category(&self, scope: &CategoryScope) -> TodoResult<usize> {
        Ok(self.lock()?.stats(scope).total_in_category)
    }

    async fn get_completed_count_in_category(&self, scope: &CategoryScope) -> TodoResult<usize> {
        Ok(self.lock()?.stats(scope).completed_in_category)
    }

    async fn get_uncompleted_count_in_category(
        &self,
        scope: &CategoryScope,
    ) -> TodoResult<usize> {
        Ok(self.lock()?.stats(scope).uncompleted_in_category)
    }

    async fn get_uncompleted_total_count(&self) -> TodoResult<usize> {
        Ok(self.lock()?.stats(&CategoryScope::All).uncompleted_total)
    }

    async fn get_total_count(&self) -> TodoResult<usize> {
        Ok(self.lock()?.tasks().len())
    }

    async fn add_task(&self, mut task: Task) -> TodoResult<Task> {
        task.title = validation::validate_title("Task", &task.title)?;
        let added = self.mutate(|data| {
            Self::check_references(data, task.category, task.priority)?;
            data.add_task(task)
        })?;
        debug!(id = ?added.id, title = %added.title, "task added");
        Ok(added)
    }

    async fn update_task(&self, mut task: Task) -> TodoResult<Task> {
        let id = require_id(EntityKind::Task, task.id)?;
        task.title = validation::validate_title("Task", &task.title)?;
        self.mutate(|data| {
            let stored = data
                .find_task(id)
                .ok_or_else(|| TodoError::not_found(EntityKind::Task, id))?;
            // Only references being changed have to exist
            let category = task.category.filter(|_| task.category != stored.category);
            let priority = task.priority.filter(|_| task.priority != stored.priority);
            Self::check_references(data, category, priority)?;
            data.update_task(task.clone());
            Ok(())
        })?;
        debug!(id, "task updated");
        Ok(task)
    }

    async fn delete_task(&self, id: TaskId) -> TodoResult<()> {
        self.mutate(|data| {
            data.remove_task(id)
                .map(|_| ())
                .ok_or_else(|| TodoError::not_found(EntityKind::Task, id))
        })?;
        debug!(id, "task deleted");
        Ok(())
    }

    async fn add_category(&self, title: &str) -> TodoResult<Category> {
        let title = validation::validate_title("Category", title)?;
        let added = self.mutate(|data| data.add_category(title))?;
        debug!(id = ?added.id, title = %added.title, "category added");
        Ok(added)
    }

    async fn update_category(&self, mut category: Category) -> TodoResult<Category> {
        let id = require_id(EntityKind::Category, category.id)?;
        category.title = validation::validate_title("Category", &category.title)?;
        self.mutate(|data| {
            data.update_category(category.clone())
                .map(|_| ())
                .ok_or_else(|| TodoError::not_found(EntityKind::Category, id))
        })?;
        debug!(id, "category updated");
        Ok(category)
    }

    async fn delete_category(&self, id: CategoryId) -> TodoResult<()> {
        self.mutate(|data| {
            data.remove_category(id)
                .map(|_| ())
                .ok_or_else(|| TodoError::not_found(EntityKind::Category, id))
        })?;
        debug!(id, "category deleted");
        Ok(())
    }

    async fn add_priority(&self, title: &str, color: &str) -> TodoResult<Priority> {
        let title = validation::validate_title("Priority", title)?;
        let color = validation::validate_color(color)?;
        let added = self.mutate(|data| data.add_priority(title, color))?;
        debug!(id = ?added.id, title = %added.title, "priority added");
        Ok(added)
    }

    async fn update_priority(&self, mut priority: Priority) -> TodoResult<Priority> {
        let id = require_id(EntityKind::Priority, priority.id)?;
        priority.title = validation::validate_title("Priority", &priority.title)?;
        priority.color = validation::validate_color(&priority.color)?;
        self.mutate(|data| {
            data.update_priority(priority.clone())
                .map(|_| ())
                .ok_or_else(|| TodoError::not_found(EntityKind::Priority, id))
        })?;
        debug!(id, "priority updated");
        Ok(priority)
    }

    async fn delete_priority(&self, id: PriorityId) -> TodoResult<()> {
        self.mutate(|data| {
            data.remove_priority(id)
                .map(|_| ())
                .ok_or_else(|| TodoError::not_found(EntityKind::Priority, id))
        })?;
        debug!(id, "priority deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_add_task_validates_title() {
        let store = LocalStore::in_memory();
        let err = store.add_task(Task::new("   ")).await.unwrap_err();
        assert!(matches!(err, TodoError::Validation(_)));
        assert_eq!(store.get_total_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_task_rejects_unknown_category() {
        let store = LocalStore::in_memory();
        let err = store
            .add_task(Task::new("Lost").with_category(Some(5)))
            .await
            .unwrap_err();
        assert_eq!(err, TodoError::not_found(EntityKind::Category, 5));
    }

    #[tokio::test]
    async fn test_update_deleted_task_is_not_found() {
        let store = LocalStore::in_memory();
        let task = store.add_task(Task::new("Temp")).await.unwrap();
        store.delete_task(task.id.unwrap()).await.unwrap();
        let err = store.update_task(task).await.unwrap_err();
        assert!(matches!(
            err,
            TodoError::NotFound {
                kind: EntityKind::Task,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_update_unsaved_task_is_invalid() {
        let store = LocalStore::in_memory();
        let err = store.update_task(Task::new("Never added")).await.unwrap_err();
        assert!(matches!(err, TodoError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_changes_are_written_through() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.toml");

        let store = LocalStore::open(&path).unwrap();
        let home = store.add_category("Home").await.unwrap();
        store
            .add_task(Task::new("Water plants").with_category(home.id))
            .await
            .unwrap();
        drop(store);

        let reopened = LocalStore::open(&path).unwrap();
        let tasks = reopened.search_tasks(&TaskFilter::new()).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].category, home.id);
    }

    #[tokio::test]
    async fn test_failed_save_rolls_back() {
        let dir = TempDir::new().unwrap();
        // A directory in place of the data file makes every save fail
        let path = dir.path().join("todo.toml");
        std::fs::create_dir(&path).unwrap();
        let store = LocalStore {
            data: Mutex::new(TodoData::new()),
            storage: Some(Storage::new(&path)),
        };

        let err = store.add_category("Home").await.unwrap_err();
        assert!(matches!(err, TodoError::Collaborator(_)));
        assert!(store.get_all_categories().await.unwrap().is_empty());
    }

    fn data_with_dangling_category() -> TodoData {
        let mut data = TodoData::new();
        data.add_category("Home").unwrap();
        data.add_task(Task::new("Call plumber")).unwrap();
        data.tasks[0].category = Some(3);
        data
    }

    #[tokio::test]
    async fn test_get_task_resolves_dangling_references() {
        let store = LocalStore::with_data(data_with_dangling_category());
        let task = store.get_task(1).await.unwrap();
        assert_eq!(task.category, None);
    }

    #[tokio::test]
    async fn test_task_with_dangling_category_stays_editable() {
        let store = LocalStore::with_data(data_with_dangling_category());

        // The stored reference is kept as is when the caller does not touch it
        let mut raw = store.snapshot().unwrap().tasks()[0].clone();
        raw.title = "Call the plumber".to_string();
        raw.completed = true;
        store.update_task(raw).await.unwrap();
        let stored = store.snapshot().unwrap().tasks()[0].clone();
        assert_eq!(stored.title, "Call the plumber");
        assert_eq!(stored.category, Some(3));

        // Pointing it at another missing category is still rejected
        let mut moved = stored.clone();
        moved.category = Some(8);
        assert_eq!(
            store.update_task(moved).await.unwrap_err(),
            TodoError::not_found(EntityKind::Category, 8)
        );

        let mut fixed = stored;
        fixed.category = Some(1);
        store.update_task(fixed).await.unwrap();
        assert_eq!(store.get_task(1).await.unwrap().category, Some(1));
    }

    #[tokio::test]
    async fn test_counts() {
        let store = LocalStore::in_memory();
        let home = store.add_category("Home").await.unwrap();
        store
            .add_task(Task::new("A").with_category(home.id))
            .await
            .unwrap();
        store
            .add_task(Task::new("B").with_category(home.id).with_completed(true))
            .await
            .unwrap();
        store.add_task(Task::new("C")).await.unwrap();

        let scope = CategoryScope::of(&home).unwrap();
        assert_eq!(store.get_total_count_in_category(&scope).await.unwrap(), 2);
        assert_eq!(store.get_completed_count_in_category(&scope).await.unwrap(), 1);
        assert_eq!(store.get_uncompleted_count_in_category(&scope).await.unwrap(), 1);
        assert_eq!(store.get_uncompleted_total_count().await.unwrap(), 2);
        assert_eq!(store.get_total_count().await.unwrap(), 3);
    }
}
