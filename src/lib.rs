//! To-do MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for a to-do
//! list with categories and priorities. Tasks are searched through a
//! composable filter (category, text, status, priority) and every view comes
//! with per-category statistics.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `TodoServerHandler` - Handles MCP protocol communication
//! - **Query Layer**: `query` module - Filter state, snapshot refresh and change notifications
//! - **Domain Layer**: `todo` module - Entities, filter predicates and statistics
//! - **Persistence Layer**: `dao` and `storage` modules - Data access over a TOML file
//!
//! # Example
//!
//! ```no_run
//! use todo_mcp::TodoServerHandler;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = TodoServerHandler::new("todo.toml").await?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod dao;
pub mod error;
pub mod formatting;
mod handlers;
pub mod query;
pub mod storage;
pub mod todo;
pub mod validation;

use anyhow::Result;
use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use tokio::sync::Mutex;

// Re-export commonly used types
pub use dao::{DataAccess, LocalStore};
pub use error::{EntityKind, TodoError, TodoResult};
pub use query::{QueryOrchestrator, QueryView};
pub use storage::Storage;
pub use todo::{Category, CategoryScope, Priority, Task, TaskFilter, TaskStats, TodoData};

/// MCP Server handler for to-do list management
///
/// Owns the query orchestrator; every tool call goes through it so the
/// filter state and the statistics stay consistent between calls.
pub struct TodoServerHandler {
    pub(crate) engine: Mutex<QueryOrchestrator<LocalStore>>,
}

impl TodoServerHandler {
    /// Create a new handler backed by a TOML file
    ///
    /// # Arguments
    /// * `storage_path` - Path to the to-do data file (created on first save)
    ///
    /// # Example
    /// ```no_run
    /// # use todo_mcp::TodoServerHandler;
    /// # use anyhow::Result;
    /// # async fn run() -> Result<()> {
    /// let handler = TodoServerHandler::new("todo.toml").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(storage_path: &str) -> Result<Self> {
        let store = LocalStore::open(storage_path)?;
        Self::from_store(store).await
    }

    /// Create a handler that keeps everything in memory
    pub async fn in_memory() -> Result<Self> {
        Self::from_store(LocalStore::in_memory()).await
    }

    /// Create a handler over an existing store and load the first view
    pub async fn from_store(store: LocalStore) -> Result<Self> {
        let mut engine = QueryOrchestrator::new(store);
        engine.init().await?;
        Ok(Self {
            engine: Mutex::new(engine),
        })
    }

    /// Copy of the current view
    pub async fn view(&self) -> QueryView {
        self.engine.lock().await.view().clone()
    }
}

/// To-do list server with categories, priorities and a filtered task view.
///
/// The server keeps a current view: a selected category (or all), a search
/// text, a completion filter and a priority filter. Every tool replies with
/// the refreshed view. Statistics always describe the selected category and
/// ignore the other filters.
///
/// IDs are numbers assigned by the server (e.g., 1, 2, 3; "#3" is accepted too).
#[mcp_server]
impl McpServer for TodoServerHandler {
    /// **Show**: Current filters, statistics and matching tasks. Changes nothing.
    #[tool]
    async fn show(&self) -> McpResult<String> {
        self.handle_show().await
    }

    /// **Select category**: Show one category's tasks and statistics.
    /// **Use**: Omit the id (or pass "all") to show every category.
    #[tool]
    async fn select_category(
        &self,
        /// Category ID, omitted or "all" = every category
        category: Option<String>,
    ) -> McpResult<String> {
        self.handle_select_category(category).await
    }

    /// **Search tasks**: Keep tasks whose title contains the text (case-insensitive).
    /// **Use**: Omit or pass "" to clear the search.
    #[tool]
    async fn search_tasks(
        &self,
        /// Text to look for in task titles
        text: Option<String>,
    ) -> McpResult<String> {
        self.handle_search_tasks(text).await
    }

    /// **Filter by status**: Show all, completed or uncompleted tasks.
    #[tool]
    async fn filter_status(
        &self,
        /// Status: all/completed/uncompleted
        status: String,
    ) -> McpResult<String> {
        self.handle_filter_status(status).await
    }

    /// **Filter by priority**: Show tasks with one priority. Omit to clear.
    #[tool]
    async fn filter_priority(
        &self,
        /// Priority ID (optional)
        priority: Option<String>,
    ) -> McpResult<String> {
        self.handle_filter_priority(priority).await
    }

    /// **Add task**: Create a task. Without a category it goes to the selected category.
    #[tool]
    async fn add_task(
        &self,
        /// Title: brief description
        title: String,
        /// Category ID, ""=uncategorized, omitted=selected category (optional)
        category: Option<String>,
        /// Priority ID (optional)
        priority: Option<String>,
        /// Date: YYYY-MM-DD (optional)
        date: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_task(title, category, priority, date).await
    }

    /// **Update task**: Change task fields.
    /// **Tip**: Use empty string "" to clear category, priority or date.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn update_task(
        &self,
        /// ID of task to update
        id: String,
        /// New title (optional)
        title: Option<String>,
        /// Completed flag (optional)
        completed: Option<bool>,
        /// Category ID, ""=clear (optional)
        category: Option<String>,
        /// Priority ID, ""=clear (optional)
        priority: Option<String>,
        /// Date YYYY-MM-DD, ""=clear (optional)
        date: Option<String>,
    ) -> McpResult<String> {
        self.handle_update_task(id, title, completed, category, priority, date)
            .await
    }

    /// **Toggle task**: Flip a task between completed and uncompleted.
    #[tool]
    async fn toggle_task(
        &self,
        /// Task ID
        id: String,
    ) -> McpResult<String> {
        self.handle_toggle_task(id).await
    }

    /// **Delete task**: Remove a task permanently.
    #[tool]
    async fn delete_task(
        &self,
        /// Task ID
        id: String,
    ) -> McpResult<String> {
        self.handle_delete_task(id).await
    }

    /// **Add category**: Create a category.
    #[tool]
    async fn add_category(
        &self,
        /// Category title
        title: String,
    ) -> McpResult<String> {
        self.handle_add_category(title).await
    }

    /// **Rename category**
    #[tool]
    async fn update_category(
        &self,
        /// Category ID
        id: String,
        /// New title
        title: String,
    ) -> McpResult<String> {
        self.handle_update_category(id, title).await
    }

    /// **Delete category**: Its tasks become uncategorized and the view returns to all categories.
    #[tool]
    async fn delete_category(
        &self,
        /// Category ID
        id: String,
    ) -> McpResult<String> {
        self.handle_delete_category(id).await
    }

    /// **Search categories**: List categories whose title contains the text. Omit to list all.
    #[tool]
    async fn search_categories(
        &self,
        /// Text to look for in category titles
        text: Option<String>,
    ) -> McpResult<String> {
        self.handle_search_categories(text).await
    }

    /// **Add priority**: Create a priority with a display color.
    #[tool]
    async fn add_priority(
        &self,
        /// Priority title
        title: String,
        /// Color: #rgb or #rrggbb, default "#fff" (optional)
        color: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_priority(title, color).await
    }

    /// **Update priority**: Change the title and/or color.
    #[tool]
    async fn update_priority(
        &self,
        /// Priority ID
        id: String,
        /// New title (optional)
        title: Option<String>,
        /// New color: #rgb or #rrggbb (optional)
        color: Option<String>,
    ) -> McpResult<String> {
        self.handle_update_priority(id, title, color).await
    }

    /// **Delete priority**: Its tasks lose their priority; a filter on it is cleared.
    #[tool]
    async fn delete_priority(
        &self,
        /// Priority ID
        id: String,
    ) -> McpResult<String> {
        self.handle_delete_priority(id).await
    }
}
