//! Validation helper functions for the to-do MCP server
//!
//! This module contains parsing of caller-supplied filter words, dates and
//! colors, and the title rules applied before anything is stored.

use crate::error::{TodoError, TodoResult};
use chrono::NaiveDate;

/// Parse a status filter word
///
/// # Arguments
/// * `status_str` - "all", "completed" or "uncompleted" (also "true"/"false")
///
/// # Returns
/// `None` for no restriction, `Some(true)` for completed, `Some(false)` for
/// uncompleted. Any other word is rejected rather than coerced.
pub fn parse_status_filter(status_str: &str) -> TodoResult<Option<bool>> {
    match status_str.trim().to_lowercase().as_str() {
        "" | "all" => Ok(None),
        "completed" | "done" | "true" => Ok(Some(true)),
        "uncompleted" | "open" | "false" => Ok(Some(false)),
        other => Err(TodoError::InvalidArgument(format!(
            "Invalid status '{}'. Valid statuses: all, completed, uncompleted",
            other
        ))),
    }
}

/// Parse a date in YYYY-MM-DD format
pub fn parse_date(date_str: &str) -> TodoResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
        TodoError::InvalidArgument(format!(
            "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')",
            date_str
        ))
    })
}

/// Parse an entity id given as text
///
/// # Arguments
/// * `what` - Entity name used in the error message
/// * `id_str` - Decimal id, optionally prefixed with '#'
pub fn parse_id(what: &str, id_str: &str) -> TodoResult<u32> {
    let trimmed = id_str.trim();
    trimmed
        .strip_prefix('#')
        .unwrap_or(trimmed)
        .parse::<u32>()
        .map_err(|_| TodoError::InvalidArgument(format!("Invalid {} id '{}'", what, id_str)))
}

/// Parse an optional reference where an empty string means "clear"
///
/// # Returns
/// `None` when the field is left unchanged, `Some(None)` to clear it,
/// `Some(Some(id))` to set it
pub fn parse_reference(what: &str, value: Option<String>) -> TodoResult<Option<Option<u32>>> {
    match value {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(Some(None)),
        Some(s) => parse_id(what, &s).map(|id| Some(Some(id))),
    }
}

/// Trim a title and reject it when nothing is left
///
/// # Arguments
/// * `what` - Entity name used in the error message ("task", "category", ...)
/// * `title` - Submitted title
pub fn validate_title(what: &str, title: &str) -> TodoResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TodoError::Validation(format!("{} title must not be empty", what)));
    }
    Ok(trimmed.to_string())
}

/// Accept `#rgb` or `#rrggbb` colors
pub fn validate_color(color: &str) -> TodoResult<String> {
    let trimmed = color.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or("");
    let valid_len = hex.len() == 3 || hex.len() == 6;
    if !valid_len || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TodoError::Validation(format!(
            "Invalid color '{}'. Use #rgb or #rrggbb (e.g., '#ff0000')",
            color
        )));
    }
    Ok(trimmed.to_lowercase())
}
