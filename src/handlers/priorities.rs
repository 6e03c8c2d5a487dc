//! Priority handlers for the to-do MCP server

use super::to_tool_result;
use crate::TodoServerHandler;
use crate::dao::DataAccess;
use crate::error::{EntityKind, TodoError};
use crate::formatting;
use crate::todo::DEFAULT_PRIORITY_COLOR;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl TodoServerHandler {
    /// Create a priority; the color defaults to white
    pub async fn handle_add_priority(
        &self,
        title: String,
        color: Option<String>,
    ) -> McpResult<String> {
        let color = color
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PRIORITY_COLOR.to_string());
        let mut engine = self.engine.lock().await;
        let added = to_tool_result(engine.add_priority(&title, &color).await)?;
        let id = match added.id {
            Some(id) => id,
            None => {
                bail_public!(_, "Priority was stored without an id");
            }
        };
        Ok(format!(
            "Priority created with ID: {}\n\n{}",
            id,
            formatting::format_priorities(&engine.view().priorities)
        ))
    }

    /// Change the title and/or color of a priority
    pub async fn handle_update_priority(
        &self,
        id: String,
        title: Option<String>,
        color: Option<String>,
    ) -> McpResult<String> {
        let id = to_tool_result(validation::parse_id("priority", &id))?;
        let mut engine = self.engine.lock().await;

        let priorities = to_tool_result(engine.dao().get_all_priorities().await)?;
        let mut priority = match priorities.into_iter().find(|p| p.id == Some(id)) {
            Some(priority) => priority,
            None => {
                return to_tool_result(Err(TodoError::not_found(EntityKind::Priority, id)));
            }
        };

        if let Some(new_title) = title {
            priority.title = new_title;
        }
        if let Some(new_color) = color {
            priority.color = new_color;
        }

        to_tool_result(engine.update_priority(priority).await)?;
        Ok(format!(
            "Priority {} updated successfully\n\n{}",
            id,
            formatting::format_view(engine.view())
        ))
    }

    /// Delete a priority; its tasks lose their priority
    pub async fn handle_delete_priority(&self, id: String) -> McpResult<String> {
        let id = to_tool_result(validation::parse_id("priority", &id))?;
        let mut engine = self.engine.lock().await;
        to_tool_result(engine.delete_priority(id).await)?;
        Ok(format!(
            "Priority {} deleted\n\n{}",
            id,
            formatting::format_view(engine.view())
        ))
    }
}
