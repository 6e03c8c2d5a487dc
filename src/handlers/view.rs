//! View and filter handlers for the to-do MCP server

use super::to_tool_result;
use crate::TodoServerHandler;
use crate::formatting;
use crate::todo::CategoryScope;
use crate::validation;
use mcp_attr::Result as McpResult;

impl TodoServerHandler {
    /// Render the current view without changing anything.
    pub async fn handle_show(&self) -> McpResult<String> {
        let engine = self.engine.lock().await;
        Ok(formatting::format_view(engine.view()))
    }

    /// Select a category by id; no id (or "all") shows every category.
    pub async fn handle_select_category(&self, category: Option<String>) -> McpResult<String> {
        let mut engine = self.engine.lock().await;

        let scope = match category.as_deref().map(str::trim) {
            None | Some("") | Some("all") => CategoryScope::All,
            Some(id_str) => {
                let id = to_tool_result(validation::parse_id("category", id_str))?;
                to_tool_result(engine.category_scope(id).await)?
            }
        };

        let view = to_tool_result(engine.select_category(scope).await)?;
        Ok(formatting::format_view(view))
    }

    /// Set the task search text; blank clears it.
    pub async fn handle_search_tasks(&self, text: Option<String>) -> McpResult<String> {
        let mut engine = self.engine.lock().await;
        let view = to_tool_result(engine.set_search_text(text.unwrap_or_default()).await)?;
        Ok(formatting::format_view(view))
    }

    /// Set the completion filter: all / completed / uncompleted.
    pub async fn handle_filter_status(&self, status: String) -> McpResult<String> {
        let status_filter = to_tool_result(validation::parse_status_filter(&status))?;
        let mut engine = self.engine.lock().await;
        let view = to_tool_result(engine.set_status_filter(status_filter).await)?;
        Ok(formatting::format_view(view))
    }

    /// Set the priority filter by id; no id clears it.
    pub async fn handle_filter_priority(&self, priority: Option<String>) -> McpResult<String> {
        let priority_filter = to_tool_result(validation::parse_reference("priority", priority))?
            .flatten();
        let mut engine = self.engine.lock().await;
        let view = to_tool_result(engine.set_priority_filter(priority_filter).await)?;
        Ok(formatting::format_view(view))
    }
}
