//! Category handlers for the to-do MCP server

use super::to_tool_result;
use crate::TodoServerHandler;
use crate::formatting;
use crate::todo::Category;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl TodoServerHandler {
    /// Create a category
    pub async fn handle_add_category(&self, title: String) -> McpResult<String> {
        let mut engine = self.engine.lock().await;
        let added = to_tool_result(engine.add_category(&title).await)?;
        let id = match added.id {
            Some(id) => id,
            None => {
                bail_public!(_, "Category was stored without an id");
            }
        };
        Ok(format!(
            "Category created with ID: {} ({})\n\n{}",
            id,
            added.title,
            formatting::format_categories(&engine.view().categories)
        ))
    }

    /// Rename a category
    pub async fn handle_update_category(&self, id: String, title: String) -> McpResult<String> {
        let id = to_tool_result(validation::parse_id("category", &id))?;
        let mut engine = self.engine.lock().await;
        let category = Category {
            id: Some(id),
            title,
        };
        let updated = to_tool_result(engine.update_category(category).await)?;
        Ok(format!(
            "Category {} renamed to '{}'\n\n{}",
            id,
            updated.title,
            formatting::format_view(engine.view())
        ))
    }

    /// Delete a category; its tasks become uncategorized
    pub async fn handle_delete_category(&self, id: String) -> McpResult<String> {
        let id = to_tool_result(validation::parse_id("category", &id))?;
        let mut engine = self.engine.lock().await;
        to_tool_result(engine.delete_category(id).await)?;
        Ok(format!(
            "Category {} deleted\n\n{}",
            id,
            formatting::format_view(engine.view())
        ))
    }

    /// Filter the category list by title; blank lists every category
    pub async fn handle_search_categories(&self, text: Option<String>) -> McpResult<String> {
        let mut engine = self.engine.lock().await;
        let view = to_tool_result(engine.search_categories(text.unwrap_or_default()).await)?;
        Ok(formatting::format_categories(&view.categories))
    }
}
