//! Task handlers for the to-do MCP server

use super::to_tool_result;
use crate::TodoServerHandler;
use crate::dao::DataAccess;
use crate::formatting;
use crate::todo::Task;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl TodoServerHandler {
    /// Create a task. Without a category it lands in the selected category;
    /// an empty category string keeps it uncategorized.
    pub async fn handle_add_task(
        &self,
        title: String,
        category: Option<String>,
        priority: Option<String>,
        date: Option<String>,
    ) -> McpResult<String> {
        let category = to_tool_result(validation::parse_reference("category", category))?;
        let priority = to_tool_result(validation::parse_reference("priority", priority))?.flatten();
        let date = match date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(date_str) => Some(to_tool_result(validation::parse_date(date_str))?),
        };

        let task = Task::new(title).with_priority(priority).with_date(date);

        let mut engine = self.engine.lock().await;
        let added = match category {
            None => to_tool_result(engine.add_task(task).await)?,
            Some(category) => {
                to_tool_result(engine.add_task_as_is(task.with_category(category)).await)?
            }
        };
        let id = match added.id {
            Some(id) => id,
            None => {
                bail_public!(_, "Task was stored without an id");
            }
        };

        Ok(format!(
            "Task created with ID: {}\n\n{}",
            id,
            formatting::format_view(engine.view())
        ))
    }

    /// Edit a task. Empty string clears category, priority or date.
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_update_task(
        &self,
        id: String,
        title: Option<String>,
        completed: Option<bool>,
        category: Option<String>,
        priority: Option<String>,
        date: Option<String>,
    ) -> McpResult<String> {
        let id = to_tool_result(validation::parse_id("task", &id))?;
        let category = to_tool_result(validation::parse_reference("category", category))?;
        let priority = to_tool_result(validation::parse_reference("priority", priority))?;
        let date = match date.as_deref().map(str::trim) {
            None => None,
            Some("") => Some(None),
            Some(date_str) => Some(Some(to_tool_result(validation::parse_date(date_str))?)),
        };

        let mut engine = self.engine.lock().await;
        let mut task = to_tool_result(engine.dao().get_task(id).await)?;

        if let Some(new_title) = title {
            task.title = new_title;
        }
        if let Some(new_completed) = completed {
            task.completed = new_completed;
        }
        if let Some(new_category) = category {
            task.category = new_category;
        }
        if let Some(new_priority) = priority {
            task.priority = new_priority;
        }
        if let Some(new_date) = date {
            task.date = new_date;
        }

        to_tool_result(engine.update_task(task).await)?;
        Ok(format!(
            "Task {} updated successfully\n\n{}",
            id,
            formatting::format_view(engine.view())
        ))
    }

    /// Flip a task between completed and uncompleted.
    pub async fn handle_toggle_task(&self, id: String) -> McpResult<String> {
        let id = to_tool_result(validation::parse_id("task", &id))?;
        let mut engine = self.engine.lock().await;
        let task = to_tool_result(engine.toggle_task(id).await)?;
        Ok(format!(
            "Task {} marked as {}\n\n{}",
            id,
            if task.completed { "completed" } else { "uncompleted" },
            formatting::format_view(engine.view())
        ))
    }

    /// Delete a task permanently.
    pub async fn handle_delete_task(&self, id: String) -> McpResult<String> {
        let id = to_tool_result(validation::parse_id("task", &id))?;
        let mut engine = self.engine.lock().await;
        to_tool_result(engine.delete_task(id).await)?;
        Ok(format!(
            "Task {} deleted\n\n{}",
            id,
            formatting::format_view(engine.view())
        ))
    }
}
