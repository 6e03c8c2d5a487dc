//! Error types for the to-do engine and its data store.

use thiserror::Error;

/// Which kind of entity an id referred to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Task,
    Category,
    Priority,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Task => write!(f, "Task"),
            EntityKind::Category => write!(f, "Category"),
            EntityKind::Priority => write!(f, "Priority"),
        }
    }
}

/// Failures surfaced by the engine and the data access collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// An operation referenced an id that is no longer present
    #[error("{kind} '{id}' not found")]
    NotFound { kind: EntityKind, id: u32 },

    /// Submitted data was rejected (e.g. an empty title)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Malformed caller input, rejected instead of coerced
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Every id of this kind has been handed out
    #[error("No {0} ids left")]
    IdsExhausted(EntityKind),

    /// The persistence layer failed
    #[error("Data store error: {0}")]
    Collaborator(String),
}

impl TodoError {
    pub fn not_found(kind: EntityKind, id: u32) -> Self {
        Self::NotFound { kind, id }
    }
}

impl From<anyhow::Error> for TodoError {
    fn from(err: anyhow::Error) -> Self {
        Self::Collaborator(format!("{:#}", err))
    }
}

pub type TodoResult<T> = Result<T, TodoError>;
