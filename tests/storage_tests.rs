//! Loading hand-written data files through the local data store
mod common;

use common::task_ids;
use std::fs;
use tempfile::TempDir;
use todo_mcp::*;

const HAND_EDITED: &str = r##"
format_version = 1

[[category]]
id = 1
title = "Shopping"

[[priority]]
id = 4
title = "High"
color = "#f00"

[[task]]
id = 1
title = "Buy milk"
category = 1
priority = 4

[[task]]
id = 7
title = "Call plumber"
completed = true
category = 3

[[task]]
title = "No id yet"
priority = 9
"##;

#[tokio::test]
async fn test_hand_edited_file_is_repaired_and_resolved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("todo.toml");
    fs::write(&path, HAND_EDITED).unwrap();

    let store = LocalStore::open(&path).unwrap();
    let data = store.snapshot().unwrap();
    assert_eq!(task_ids(data.tasks()), vec![1, 7, 8]);

    // Category 3 does not exist, so task 7 only shows up under "all"
    let all = store.search_tasks(&TaskFilter::new()).await.unwrap();
    assert_eq!(task_ids(&all), vec![1, 7, 8]);
    assert!(all.iter().all(|t| t.id != Some(7) || t.category.is_none()));

    let shopping = TaskFilter::new().with_category(CategoryScope::Category(1));
    assert_eq!(task_ids(&store.search_tasks(&shopping).await.unwrap()), vec![1]);

    let ghost = TaskFilter::new().with_category(CategoryScope::Category(3));
    assert!(store.search_tasks(&ghost).await.unwrap().is_empty());
    assert_eq!(
        store
            .get_total_count_in_category(&CategoryScope::Category(3))
            .await
            .unwrap(),
        0
    );
    assert_eq!(store.get_total_count().await.unwrap(), 3);
    assert_eq!(store.get_uncompleted_total_count().await.unwrap(), 2);

    // New entities continue after the highest stored ids
    let added = store.add_task(Task::new("Next")).await.unwrap();
    assert_eq!(added.id, Some(9));
    let priority = store.add_priority("Low", "#00f").await.unwrap();
    assert_eq!(priority.id, Some(5));
}

#[tokio::test]
async fn test_newer_format_version_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("todo.toml");
    fs::write(&path, "format_version = 2\n").unwrap();

    let err = LocalStore::open(&path).err().unwrap();
    assert!(format!("{:#}", err).contains("Failed to parse"));
}

#[tokio::test]
async fn test_missing_file_starts_empty_and_is_created_on_change() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fresh.toml");

    let store = LocalStore::open(&path).unwrap();
    assert_eq!(store.get_total_count().await.unwrap(), 0);
    assert!(!path.exists());

    store.add_category("Inbox").await.unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("format_version = 1"));
    assert!(content.contains("[[category]]"));
    assert!(content.contains("Inbox"));
}

#[tokio::test]
async fn test_task_with_missing_category_can_be_toggled_and_renamed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("todo.toml");
    fs::write(&path, HAND_EDITED).unwrap();

    let mut engine = QueryOrchestrator::new(LocalStore::open(&path).unwrap());
    engine.init().await.unwrap();

    let toggled = engine.toggle_task(7).await.unwrap();
    assert!(!toggled.completed);
    assert_eq!(engine.view().stats.uncompleted_total, 3);

    let mut task = engine.dao().get_task(7).await.unwrap();
    task.title = "Call the plumber".to_string();
    engine.update_task(task).await.unwrap();

    let reopened = LocalStore::open(&path).unwrap();
    let stored = reopened.get_task(7).await.unwrap();
    assert_eq!(stored.title, "Call the plumber");
    assert!(!stored.completed);
}

#[tokio::test]
async fn test_max_stored_id_reports_exhaustion() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("todo.toml");
    fs::write(&path, "[[task]]\nid = 4294967295\ntitle = \"Last\"\n").unwrap();

    let store = LocalStore::open(&path).unwrap();
    let err = store.add_task(Task::new("One more")).await.unwrap_err();
    assert_eq!(err, TodoError::IdsExhausted(EntityKind::Task));
    assert_eq!(store.get_total_count().await.unwrap(), 1);
}
