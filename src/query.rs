//! Query orchestrator
//!
//! Holds the current filter state and the last snapshot fetched from the data
//! store, and is the single entry point for everything that changes either.
//! Every refresh is recomputed from scratch from (filter state, store
//! contents). A refresh commits only when all of its fetches succeed; on
//! failure the previous view and filter state stay in place.

use tracing::{debug, info, warn};

use crate::dao::DataAccess;
use crate::error::{EntityKind, TodoError, TodoResult};
use crate::todo::{
    Category, CategoryId, CategoryScope, Priority, PriorityId, Task, TaskFilter, TaskId, TaskStats,
};

/// Everything the presentation layer shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryView {
    /// Tasks passing the current filter, in stored order
    pub tasks: Vec<Task>,
    /// Categories matching the current category search text
    pub categories: Vec<Category>,
    /// Every category, used to name the categories tasks refer to
    pub all_categories: Vec<Category>,
    pub priorities: Vec<Priority>,
    /// Counters for the selected category, independent of the other filters
    pub stats: TaskStats,
    pub filter: TaskFilter,
    pub category_search: String,
}

impl QueryView {
    pub fn category_title(&self, id: CategoryId) -> Option<&str> {
        self.all_categories
            .iter()
            .find(|c| c.id == Some(id))
            .map(|c| c.title.as_str())
    }

    pub fn priority(&self, id: PriorityId) -> Option<&Priority> {
        self.priorities.iter().find(|p| p.id == Some(id))
    }
}

type Listener = Box<dyn Fn(&QueryView) + Send + Sync>;

pub struct QueryOrchestrator<D: DataAccess> {
    dao: D,
    view: QueryView,
    listeners: Vec<Listener>,
}

impl<D: DataAccess> QueryOrchestrator<D> {
    /// Create an orchestrator with an empty view and no filters
    ///
    /// Call `init` to fetch the first snapshot.
    pub fn new(dao: D) -> Self {
        Self {
            dao,
            view: QueryView::default(),
            listeners: Vec::new(),
        }
    }

    pub fn dao(&self) -> &D {
        &self.dao
    }

    pub fn view(&self) -> &QueryView {
        &self.view
    }

    pub fn filter(&self) -> &TaskFilter {
        &self.view.filter
    }

    pub fn selected_category(&self) -> CategoryScope {
        self.view.filter.category
    }

    /// Register a callback invoked with the view after every successful change
    pub fn subscribe(&mut self, listener: impl Fn(&QueryView) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&self) {
        for listener in &self.listeners {
            listener(&self.view);
        }
    }

    /// Load priorities and categories and show every category
    pub async fn init(&mut self) -> TodoResult<&QueryView> {
        let filter = self.view.filter.clone().with_category(CategoryScope::All);
        self.refresh_all(filter).await?;
        info!(
            tasks = self.view.tasks.len(),
            categories = self.view.categories.len(),
            priorities = self.view.priorities.len(),
            "initial view loaded"
        );
        Ok(&self.view)
    }

    // === Filter changes ===

    /// Select a category (or `All`) and refresh tasks and statistics
    pub async fn select_category(&mut self, scope: CategoryScope) -> TodoResult<&QueryView> {
        debug!(?scope, "select category");
        let filter = self.view.filter.clone().with_category(scope);
        let (tasks, stats) = tokio::try_join!(
            self.dao.search_tasks(&filter),
            fetch_stats(&self.dao, &filter.category),
        )
        .inspect_err(|e| warn!(error = %e, "category refresh failed"))?;
        self.view.tasks = tasks;
        self.view.stats = stats;
        self.view.filter = filter;
        self.emit();
        Ok(&self.view)
    }

    /// Change the search text; statistics are unaffected
    pub async fn set_search_text(&mut self, text: impl Into<String>) -> TodoResult<&QueryView> {
        let filter = self.view.filter.clone().with_search_text(text);
        debug!(search = %filter.search_text, "set search text");
        self.refresh_tasks(filter).await
    }

    /// Change the completion filter; statistics are unaffected
    pub async fn set_status_filter(&mut self, status: Option<bool>) -> TodoResult<&QueryView> {
        debug!(?status, "set status filter");
        let filter = self.view.filter.clone().with_status(status);
        self.refresh_tasks(filter).await
    }

    /// Change the priority filter; statistics are unaffected
    pub async fn set_priority_filter(
        &mut self,
        priority: Option<PriorityId>,
    ) -> TodoResult<&QueryView> {
        debug!(?priority, "set priority filter");
        let filter = self.view.filter.clone().with_priority(priority);
        self.refresh_tasks(filter).await
    }

    /// Change the category search text and refresh the category list
    pub async fn search_categories(&mut self, text: impl Into<String>) -> TodoResult<&QueryView> {
        let text = text.into();
        let categories = self.dao.search_categories(&text).await?;
        self.view.categories = categories;
        self.view.category_search = text;
        self.emit();
        Ok(&self.view)
    }

    // === Change notifications ===

    pub async fn notify_task_changed(&mut self) -> TodoResult<&QueryView> {
        self.refresh_current().await
    }

    pub async fn notify_task_added(&mut self) -> TodoResult<&QueryView> {
        self.refresh_current().await
    }

    pub async fn notify_task_deleted(&mut self) -> TodoResult<&QueryView> {
        self.refresh_current().await
    }

    pub async fn notify_category_changed(&mut self) -> TodoResult<&QueryView> {
        self.refresh_current().await
    }

    /// A category was deleted: go back to all categories and refresh
    pub async fn notify_category_deleted(&mut self) -> TodoResult<&QueryView> {
        let filter = self.view.filter.clone().with_category(CategoryScope::All);
        self.refresh_all(filter).await
    }

    pub async fn notify_priority_changed(&mut self) -> TodoResult<&QueryView> {
        self.refresh_current().await
    }

    /// A priority was deleted: drop a priority filter that pointed at it
    pub async fn notify_priority_deleted(&mut self, id: PriorityId) -> TodoResult<&QueryView> {
        let mut filter = self.view.filter.clone();
        if filter.priority == Some(id) {
            filter.priority = None;
        }
        self.refresh_all(filter).await
    }

    // === Edits issued through the data store ===

    /// Add a task, placing it in the selected category when it has none
    pub async fn add_task(&mut self, mut task: Task) -> TodoResult<Task> {
        if task.category.is_none() {
            task.category = self.selected_category().category_id();
        }
        self.add_task_as_is(task).await
    }

    /// Add a task keeping its category as given, `None` included
    pub async fn add_task_as_is(&mut self, task: Task) -> TodoResult<Task> {
        let added = self.dao.add_task(task).await?;
        self.notify_task_added().await?;
        Ok(added)
    }

    pub async fn update_task(&mut self, task: Task) -> TodoResult<Task> {
        let updated = self.dao.update_task(task).await?;
        self.notify_task_changed().await?;
        Ok(updated)
    }

    /// Flip a task between completed and uncompleted
    pub async fn toggle_task(&mut self, id: TaskId) -> TodoResult<Task> {
        let mut task = self.dao.get_task(id).await?;
        task.toggle();
        self.update_task(task).await
    }

    pub async fn delete_task(&mut self, id: TaskId) -> TodoResult<()> {
        self.dao.delete_task(id).await?;
        self.notify_task_deleted().await?;
        Ok(())
    }

    pub async fn add_category(&mut self, title: &str) -> TodoResult<Category> {
        let added = self.dao.add_category(title).await?;
        self.notify_category_changed().await?;
        Ok(added)
    }

    pub async fn update_category(&mut self, category: Category) -> TodoResult<Category> {
        let updated = self.dao.update_category(category).await?;
        self.notify_category_changed().await?;
        Ok(updated)
    }

    pub async fn delete_category(&mut self, id: CategoryId) -> TodoResult<()> {
        self.dao.delete_category(id).await?;
        self.notify_category_deleted().await?;
        Ok(())
    }

    pub async fn add_priority(&mut self, title: &str, color: &str) -> TodoResult<Priority> {
        let added = self.dao.add_priority(title, color).await?;
        self.notify_priority_changed().await?;
        Ok(added)
    }

    pub async fn update_priority(&mut self, priority: Priority) -> TodoResult<Priority> {
        let updated = self.dao.update_priority(priority).await?;
        self.notify_priority_changed().await?;
        Ok(updated)
    }

    pub async fn delete_priority(&mut self, id: PriorityId) -> TodoResult<()> {
        self.dao.delete_priority(id).await?;
        self.notify_priority_deleted(id).await?;
        Ok(())
    }

    /// Resolve a category id to a scope, failing when it does not exist
    pub async fn category_scope(&self, id: CategoryId) -> TodoResult<CategoryScope> {
        let categories = self.dao.get_all_categories().await?;
        categories
            .iter()
            .find(|c| c.id == Some(id))
            .map(CategoryScope::of)
            .unwrap_or_else(|| Err(TodoError::not_found(EntityKind::Category, id)))
    }

    // === Recompute ===

    async fn refresh_tasks(&mut self, filter: TaskFilter) -> TodoResult<&QueryView> {
        let tasks = self
            .dao
            .search_tasks(&filter)
            .await
            .inspect_err(|e| warn!(error = %e, "task refresh failed"))?;
        self.view.tasks = tasks;
        self.view.filter = filter;
        self.emit();
        Ok(&self.view)
    }

    async fn refresh_current(&mut self) -> TodoResult<&QueryView> {
        let filter = self.view.filter.clone();
        self.refresh_all(filter).await
    }

    /// Recompute tasks, statistics and both entity lists under `filter`
    async fn refresh_all(&mut self, filter: TaskFilter) -> TodoResult<&QueryView> {
        let (tasks, stats, categories, all_categories, priorities) = tokio::try_join!(
            self.dao.search_tasks(&filter),
            fetch_stats(&self.dao, &filter.category),
            self.dao.search_categories(&self.view.category_search),
            self.dao.get_all_categories(),
            self.dao.get_all_priorities(),
        )
        .inspect_err(|e| warn!(error = %e, "full refresh failed"))?;
        debug!(
            tasks = tasks.len(),
            total = stats.total_in_category,
            "view recomputed"
        );
        self.view.tasks = tasks;
        self.view.stats = stats;
        self.view.categories = categories;
        self.view.all_categories = all_categories;
        self.view.priorities = priorities;
        self.view.filter = filter;
        self.emit();
        Ok(&self.view)
    }
}

/// Fetch the four counters for `scope` as one snapshot
async fn fetch_stats<D: DataAccess>(dao: &D, scope: &CategoryScope) -> TodoResult<TaskStats> {
    let (total, completed, uncompleted, uncompleted_total) = tokio::try_join!(
        dao.get_total_count_in_category(scope),
        dao.get_completed_count_in_category(scope),
        dao.get_uncompleted_count_in_category(scope),
        dao.get_uncompleted_total_count(),
    )?;
    Ok(TaskStats {
        total_in_category: total,
        completed_in_category: completed,
        uncompleted_in_category: uncompleted,
        uncompleted_total,
    })
}
