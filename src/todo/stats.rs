//! Completion statistics scoped to a category
//!
//! Counters always run over the unfiltered task collection. Only the category
//! scope narrows them; search text, status and priority filters never do.

use serde::{Deserialize, Serialize};

use super::scope::CategoryScope;
use super::task::Task;

fn in_scope<'a>(tasks: &'a [Task], scope: &'a CategoryScope) -> impl Iterator<Item = &'a Task> {
    tasks.iter().filter(move |task| scope.contains(task.category))
}

/// Number of tasks in `scope`
pub fn total_count(tasks: &[Task], scope: &CategoryScope) -> usize {
    in_scope(tasks, scope).count()
}

/// Number of completed tasks in `scope`
pub fn completed_count(tasks: &[Task], scope: &CategoryScope) -> usize {
    in_scope(tasks, scope).filter(|task| task.completed).count()
}

/// Number of uncompleted tasks in `scope`
pub fn uncompleted_count(tasks: &[Task], scope: &CategoryScope) -> usize {
    in_scope(tasks, scope).filter(|task| !task.completed).count()
}

/// Number of uncompleted tasks across every category
pub fn uncompleted_total_count(tasks: &[Task]) -> usize {
    uncompleted_count(tasks, &CategoryScope::All)
}

/// The four figures shown next to the task list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total_in_category: usize,
    pub completed_in_category: usize,
    pub uncompleted_in_category: usize,
    pub uncompleted_total: usize,
}

impl TaskStats {
    pub fn compute(tasks: &[Task], scope: &CategoryScope) -> Self {
        Self {
            total_in_category: total_count(tasks, scope),
            completed_in_category: completed_count(tasks, scope),
            uncompleted_in_category: uncompleted_count(tasks, scope),
            uncompleted_total: uncompleted_total_count(tasks),
        }
    }
}
