//! MCP tool handlers for the to-do server
//!
//! This module contains the implementation of all MCP tool handlers,
//! grouped by what they operate on.

pub mod categories;
pub mod priorities;
pub mod tasks;
pub mod view;

use crate::error::{TodoError, TodoResult};
use mcp_attr::{Result as McpResult, bail_public};

/// Turn an engine result into a tool result with a client-visible message
pub(crate) fn to_tool_result<T>(result: TodoResult<T>) -> McpResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(TodoError::Collaborator(message)) => {
            bail_public!(_, "Data store error: {}", message);
        }
        Err(e) => Err(
            mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(e.to_string(), true),
        ),
    }
}
