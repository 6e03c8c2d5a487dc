//! Common test utilities for integration tests
#![allow(dead_code)]

use tempfile::TempDir;
use todo_mcp::{Category, LocalStore, Task, TodoData, TodoServerHandler};

/// Create a handler whose data file lives in a fresh temporary directory
pub async fn get_test_handler() -> (TodoServerHandler, TempDir) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("todo.toml");
    let handler = TodoServerHandler::new(path.to_str().unwrap()).await.unwrap();
    (handler, dir)
}

/// Extract the numeric ID from a "... created with ID: <id> ..." reply
pub fn extract_id_from_response(response: &str) -> String {
    let start = response.find("ID: ").map(|i| i + 4).unwrap_or(0);
    response[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect()
}

/// Two categories and three tasks:
/// 1 "Buy milk" (Shopping, open), 2 "Buy bread" (Shopping, done),
/// 3 "Walk dog" (Pets, open)
pub fn scenario_data() -> TodoData {
    let mut data = TodoData::new();
    let shopping = data.add_category("Shopping").unwrap();
    let pets = data.add_category("Pets").unwrap();
    data.add_task(Task::new("Buy milk").with_category(shopping.id))
        .unwrap();
    data.add_task(
        Task::new("Buy bread")
            .with_category(shopping.id)
            .with_completed(true),
    )
    .unwrap();
    data.add_task(Task::new("Walk dog").with_category(pets.id))
        .unwrap();
    data
}

pub fn scenario_store() -> LocalStore {
    LocalStore::with_data(scenario_data())
}

pub fn category(id: u32, title: &str) -> Category {
    Category {
        id: Some(id),
        title: title.to_string(),
    }
}

pub fn task_ids(tasks: &[Task]) -> Vec<u32> {
    tasks.iter().filter_map(|t| t.id).collect()
}
