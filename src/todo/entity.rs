//! Identity rules shared by tasks, categories and priorities.

/// Identifier of a task, assigned by the data store on creation.
pub type TaskId = u32;

/// Identifier of a category, assigned by the data store on creation.
pub type CategoryId = u32;

/// Identifier of a priority, assigned by the data store on creation.
pub type PriorityId = u32;

/// Common identity behaviour for stored entities.
///
/// Two values denote the same entity only when both carry an id and the ids
/// are equal. A value without an id (not yet created) is never the same
/// entity as anything, not even itself.
pub trait Entity {
    /// Store-assigned identifier, `None` before creation.
    fn id(&self) -> Option<u32>;

    /// Assign the store identifier
    fn set_id(&mut self, id: u32);

    /// Check whether `self` and `other` refer to the same stored entity
    fn is_same_entity(&self, other: &Self) -> bool {
        match (self.id(), other.id()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
