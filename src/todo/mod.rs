//! To-do domain models and the search/statistics engine
//!
//! This module contains the core data structures and their implementations.
//! It is split into submodules:
//! - `entity`, `task`, `category`, `priority`: entity shapes and identity
//! - `scope`: the "all categories" selection vs. a concrete category
//! - `filter`: filter state and the independent filter criteria
//! - `stats`: category-scoped completion counters
//! - `todo_data`: owned collections with CRUD and cascade rules
//! - `serde_impl`: TOML representation of `TodoData`

mod category;
mod entity;
pub mod filter;
mod priority;
mod scope;
mod serde_impl;
pub mod stats;
mod task;
mod todo_data;

// Re-export all public types
pub use category::Category;
pub use entity::{CategoryId, Entity, PriorityId, TaskId};
pub use filter::{Criterion, TaskFilter, filter_tasks};
pub use priority::{DEFAULT_PRIORITY_COLOR, Priority};
pub use scope::CategoryScope;
pub use stats::TaskStats;
pub use task::Task;
pub use todo_data::{FORMAT_VERSION, TodoData};
