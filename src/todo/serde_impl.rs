//! Serialization and deserialization implementations for TodoData
//!
//! The file layout is a flat TOML document with the format version, the id
//! counters and one array of tables per entity kind (`[[task]]`,
//! `[[category]]`, `[[priority]]`). Counters are repaired on load so data
//! edited by hand never produces duplicate ids.

use super::category::Category;
use super::priority::Priority;
use super::task::Task;
use super::todo_data::{FORMAT_VERSION, TodoData};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize)]
struct TodoDataRef<'a> {
    format_version: u32,
    task_counter: u32,
    category_counter: u32,
    priority_counter: u32,
    #[serde(skip_serializing_if = "is_empty")]
    category: &'a [Category],
    #[serde(skip_serializing_if = "is_empty")]
    priority: &'a [Priority],
    #[serde(skip_serializing_if = "is_empty")]
    task: &'a [Task],
}

fn is_empty<T>(items: &&[T]) -> bool {
    items.is_empty()
}

#[derive(Deserialize)]
#[serde(default)]
struct TodoDataHelper {
    format_version: u32,
    task_counter: u32,
    category_counter: u32,
    priority_counter: u32,
    category: Vec<Category>,
    priority: Vec<Priority>,
    task: Vec<Task>,
}

impl Default for TodoDataHelper {
    fn default() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            task_counter: 0,
            category_counter: 0,
            priority_counter: 0,
            category: Vec::new(),
            priority: Vec::new(),
            task: Vec::new(),
        }
    }
}

impl Serialize for TodoData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        TodoDataRef {
            format_version: FORMAT_VERSION,
            task_counter: self.task_counter,
            category_counter: self.category_counter,
            priority_counter: self.priority_counter,
            category: &self.categories,
            priority: &self.priorities,
            task: &self.tasks,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TodoData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let helper = TodoDataHelper::deserialize(deserializer)?;

        if helper.format_version > FORMAT_VERSION {
            return Err(serde::de::Error::custom(format!(
                "unsupported format_version {} (newest supported: {})",
                helper.format_version, FORMAT_VERSION
            )));
        }

        let mut data = TodoData {
            format_version: FORMAT_VERSION,
            tasks: helper.task,
            categories: helper.category,
            priorities: helper.priority,
            task_counter: helper.task_counter,
            category_counter: helper.category_counter,
            priority_counter: helper.priority_counter,
        };
        data.repair_ids()
            .map_err(<D::Error as serde::de::Error>::custom)?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_toml_layout() {
        let mut data = TodoData::new();
        let home = data.add_category("Home").unwrap();
        data.add_task(
            Task::new("Buy milk")
                .with_category(home.id)
                .with_date(NaiveDate::from_ymd_opt(2024, 3, 15)),
        )
        .unwrap();

        let text = toml::to_string_pretty(&data).unwrap();
        assert!(text.contains("format_version = 1"));
        assert!(text.contains("[[task]]"));
        assert!(text.contains("[[category]]"));
        assert!(!text.contains("[[priority]]"));
        assert!(text.contains("2024-03-15"));

        let loaded: TodoData = toml::from_str(&text).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_empty_document_is_empty_data() {
        let loaded: TodoData = toml::from_str("").unwrap();
        assert_eq!(loaded, TodoData::new());
    }

    #[test]
    fn test_hand_edited_file_gets_ids() {
        let text = r#"
format_version = 1

[[category]]
id = 4
title = "Work"

[[task]]
title = "No id yet"
category = 4
"#;
        let loaded: TodoData = toml::from_str(text).unwrap();
        assert_eq!(loaded.category_counter, 4);
        assert_eq!(loaded.tasks()[0].id, Some(1));
        assert_eq!(loaded.tasks()[0].category, Some(4));
        assert!(!loaded.tasks()[0].completed);
    }

    #[test]
    fn test_duplicate_ids_are_reassigned() {
        let text = r#"
[[task]]
id = 2
title = "First"

[[task]]
id = 2
title = "Copy"

[[task]]
id = 5
title = "Later"
"#;
        let loaded: TodoData = toml::from_str(text).unwrap();
        let ids: Vec<_> = loaded.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![Some(2), Some(6), Some(5)]);
        assert_eq!(loaded.task_counter, 6);
    }

    #[test]
    fn test_max_id_loads_but_cannot_grow() {
        let text = r#"
[[task]]
id = 4294967295
title = "Last"

[[task]]
title = "Needs an id"
"#;
        let result: Result<TodoData, _> = toml::from_str(text);
        assert!(result.is_err());

        let mut loaded: TodoData =
            toml::from_str("[[task]]\nid = 4294967295\ntitle = \"Last\"\n").unwrap();
        assert_eq!(
            loaded.add_task(Task::new("One more")).unwrap_err(),
            crate::error::TodoError::IdsExhausted(crate::error::EntityKind::Task)
        );
        assert_eq!(loaded.tasks().len(), 1);
    }

    #[test]
    fn test_newer_format_is_rejected() {
        let result: Result<TodoData, _> = toml::from_str("format_version = 99");
        assert!(result.is_err());
    }
}
