/// Storage layer for habit data
///
/// This module defines the storage interface used by the tools and its
/// in-memory implementation. Data lives only as long as the process.

pub mod memory;
pub mod query;

// Re-export the main storage types
pub use memory::*;
pub use query::{HabitPage, ListQuery, DEFAULT_PAGE_SIZE};

use thiserror::Error;
use crate::domain::{Habit, HabitId, HabitPatch, NewHabit, UserId};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: HabitId },

    #[error("Original habit not found: {habit_id}")]
    OriginalNotFound { habit_id: HabitId },

    #[error("Storage lock poisoned by a panicked writer")]
    LockPoisoned,
}

/// Trait defining the storage interface for habits
///
/// Every operation is scoped by the owning user: a habit is invisible to
/// any other owner. Inputs are expected to be validated already.
pub trait HabitStorage {
    /// Create a new habit, assigning the next id
    fn create_habit(&self, owner: UserId, new: NewHabit) -> Result<Habit, StorageError>;

    /// Get a habit by ID; `None` if it doesn't exist for this owner
    fn get_habit(&self, habit_id: HabitId, owner: UserId) -> Result<Option<Habit>, StorageError>;

    /// List habits with filtering, sorting and pagination
    fn list_habits(&self, owner: UserId, query: &ListQuery) -> Result<HabitPage, StorageError>;

    /// Apply a partial update and return the merged habit
    fn update_habit(
        &self,
        habit_id: HabitId,
        owner: UserId,
        patch: HabitPatch,
    ) -> Result<Habit, StorageError>;

    /// Permanently remove a habit
    fn delete_habit(&self, habit_id: HabitId, owner: UserId) -> Result<bool, StorageError>;

    /// Create a copy of an existing habit under a new name
    fn duplicate_habit(
        &self,
        habit_id: HabitId,
        owner: UserId,
        new_name: String,
    ) -> Result<Habit, StorageError>;
}
