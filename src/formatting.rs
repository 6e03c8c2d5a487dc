//! Formatting helper functions for the to-do MCP server
//!
//! This module renders the orchestrator's view as plain text for tool replies.

use crate::query::QueryView;
use crate::todo::{Category, CategoryScope, Priority, Task};

/// Row color for a completed task
pub const COMPLETED_TASK_COLOR: &str = "#F8F9FA";
/// Row color for a task without a (resolvable) priority
pub const NO_PRIORITY_COLOR: &str = "#fff";

/// Display color of a task row
///
/// Completed tasks are greyed out; otherwise the priority color is used.
pub fn display_color<'a>(task: &Task, priorities: &'a [Priority]) -> &'a str {
    if task.completed {
        return COMPLETED_TASK_COLOR;
    }
    task.priority
        .and_then(|id| priorities.iter().find(|p| p.id == Some(id)))
        .map(|p| p.color.as_str())
        .filter(|color| !color.is_empty())
        .unwrap_or(NO_PRIORITY_COLOR)
}

/// Human readable name of the selected scope
pub fn scope_name(view: &QueryView) -> String {
    match view.filter.category {
        CategoryScope::All => "All".to_string(),
        CategoryScope::Category(id) => view
            .category_title(id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", id)),
    }
}

/// Format the active filters on one line
pub fn format_filters(view: &QueryView) -> String {
    let filter = &view.filter;
    let status = match filter.status {
        None => "all",
        Some(true) => "completed",
        Some(false) => "uncompleted",
    };
    let priority = match filter.priority {
        None => "any".to_string(),
        Some(id) => view
            .priority(id)
            .map(|p| p.title.clone())
            .unwrap_or_else(|| format!("#{}", id)),
    };
    let search = filter.search_text.trim();
    format!(
        "Category: {} | Search: {} | Status: {} | Priority: {}",
        scope_name(view),
        if search.is_empty() { "-" } else { search },
        status,
        priority
    )
}

/// Format the statistics block
pub fn format_stats(view: &QueryView) -> String {
    let stats = &view.stats;
    format!(
        "Total in category: {}\nCompleted in category: {}\nUncompleted in category: {}\nUncompleted total: {}\n",
        stats.total_in_category,
        stats.completed_in_category,
        stats.uncompleted_in_category,
        stats.uncompleted_total
    )
}

/// Format the visible tasks
pub fn format_tasks(view: &QueryView) -> String {
    if view.tasks.is_empty() {
        return "No tasks found\n".to_string();
    }

    let mut result = format!("Found {} task(s):\n\n", view.tasks.len());
    for task in &view.tasks {
        let id = task.id.map_or_else(|| "-".to_string(), |id| id.to_string());
        result.push_str(&format!(
            "- [{}] #{} {} (color: {})\n",
            if task.completed { "x" } else { " " },
            id,
            task.title,
            display_color(task, &view.priorities)
        ));

        if let Some(category_id) = task.category {
            let name = view.category_title(category_id).unwrap_or("(unknown)");
            result.push_str(&format!("  Category: {}\n", name));
        }
        if let Some(priority_id) = task.priority {
            let name = view
                .priority(priority_id)
                .map(|p| p.title.as_str())
                .unwrap_or("(unknown)");
            result.push_str(&format!("  Priority: {}\n", name));
        }
        if let Some(ref date) = task.date {
            result.push_str(&format!("  Date: {}\n", date));
        }
    }

    result
}

pub fn format_categories(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found\n".to_string();
    }
    let mut result = format!("Found {} category(ies):\n", categories.len());
    for category in categories {
        if let Some(id) = category.id {
            result.push_str(&format!("- #{} {}\n", id, category.title));
        }
    }
    result
}

pub fn format_priorities(priorities: &[Priority]) -> String {
    if priorities.is_empty() {
        return "No priorities defined\n".to_string();
    }
    let mut result = format!("Found {} priority(ies):\n", priorities.len());
    for priority in priorities {
        if let Some(id) = priority.id {
            result.push_str(&format!(
                "- #{} {} ({})\n",
                id, priority.title, priority.color
            ));
        }
    }
    result
}

/// Format the whole view: filters, statistics, tasks
pub fn format_view(view: &QueryView) -> String {
    format!(
        "{}\n\n{}\n{}",
        format_filters(view),
        format_stats(view),
        format_tasks(view)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::{TaskFilter, TaskStats};

    fn view() -> QueryView {
        let shopping = Category {
            id: Some(1),
            title: "Shopping".to_string(),
        };
        QueryView {
            tasks: vec![
                Task {
                    id: Some(1),
                    title: "Buy milk".to_string(),
                    category: Some(1),
                    priority: Some(1),
                    ..Default::default()
                },
                Task {
                    id: Some(2),
                    title: "Buy bread".to_string(),
                    completed: true,
                    category: Some(1),
                    ..Default::default()
                },
            ],
            categories: vec![shopping.clone()],
            all_categories: vec![shopping],
            priorities: vec![Priority {
                id: Some(1),
                title: "High".to_string(),
                color: "#f00".to_string(),
            }],
            stats: TaskStats {
                total_in_category: 2,
                completed_in_category: 1,
                uncompleted_in_category: 1,
                uncompleted_total: 3,
            },
            filter: TaskFilter::new()
                .with_category(CategoryScope::Category(1))
                .with_search_text("buy"),
            category_search: String::new(),
        }
    }

    #[test]
    fn test_display_color() {
        let view = view();
        assert_eq!(display_color(&view.tasks[0], &view.priorities), "#f00");
        assert_eq!(
            display_color(&view.tasks[1], &view.priorities),
            COMPLETED_TASK_COLOR
        );
        assert_eq!(display_color(&Task::new("plain"), &view.priorities), NO_PRIORITY_COLOR);
    }

    #[test]
    fn test_format_view() {
        let text = format_view(&view());
        assert!(text.contains("Category: Shopping | Search: buy | Status: all | Priority: any"));
        assert!(text.contains("Total in category: 2"));
        assert!(text.contains("Uncompleted total: 3"));
        assert!(text.contains("Found 2 task(s)"));
        assert!(text.contains("- [x] #2 Buy bread"));
        assert!(text.contains("  Priority: High"));
    }

    #[test]
    fn test_names_come_from_all_categories() {
        let mut view = view();
        view.categories.clear();
        view.category_search = "garden".to_string();
        let text = format_view(&view);
        assert!(text.contains("Category: Shopping |"));
        assert!(text.contains("  Category: Shopping\n"));
        assert!(!text.contains("(unknown)"));
    }

    #[test]
    fn test_format_empty_tasks() {
        let mut view = view();
        view.tasks.clear();
        assert_eq!(format_tasks(&view), "No tasks found\n");
    }

    #[test]
    fn test_format_lists() {
        let view = view();
        assert!(format_categories(&view.categories).contains("- #1 Shopping"));
        assert!(format_priorities(&view.priorities).contains("- #1 High (#f00)"));
        assert_eq!(format_priorities(&[]), "No priorities defined\n");
    }
}
