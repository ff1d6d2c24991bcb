/// In-memory implementation of the habit storage interface
///
/// Habits are kept in insertion order in a vector, together with the id
/// counter, behind a single read/write lock. Nothing is persisted.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use crate::domain::{Habit, HabitId, HabitPatch, NewHabit, UserId};
use crate::storage::{HabitPage, HabitStorage, ListQuery, StorageError};

/// In-memory habit store
///
/// Construct one per server and share it by reference; each test gets a
/// fresh, empty instance.
#[derive(Debug)]
pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    habits: Vec<Habit>,
    /// Next id to hand out; only ever increases, so ids are never reused
    next_id: u64,
}

impl Inner {
    fn insert(&mut self, owner: UserId, new: NewHabit) -> Habit {
        let id = HabitId(self.next_id);
        self.next_id += 1;

        let habit = Habit::from_new(id, owner, new, Utc::now());
        self.habits.push(habit.clone());
        habit
    }

    fn position(&self, habit_id: HabitId, owner: UserId) -> Option<usize> {
        self.habits
            .iter()
            .position(|h| h.id == habit_id && h.owner == owner)
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    /// Create an empty store; the first habit gets id 1
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                habits: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of habits across all owners
    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.read()?.habits.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.read()?.habits.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StorageError> {
        self.inner.read().map_err(|_| StorageError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StorageError> {
        self.inner.write().map_err(|_| StorageError::LockPoisoned)
    }
}

impl HabitStorage for MemoryStorage {
    fn create_habit(&self, owner: UserId, new: NewHabit) -> Result<Habit, StorageError> {
        let habit = self.write()?.insert(owner, new);

        tracing::debug!("Created habit: {} ({})", habit.name, habit.id);
        Ok(habit)
    }

    fn get_habit(&self, habit_id: HabitId, owner: UserId) -> Result<Option<Habit>, StorageError> {
        let inner = self.read()?;
        Ok(inner
            .habits
            .iter()
            .find(|h| h.id == habit_id && h.owner == owner)
            .cloned())
    }

    fn list_habits(&self, owner: UserId, query: &ListQuery) -> Result<HabitPage, StorageError> {
        let inner = self.read()?;
        let page = query.apply(inner.habits.iter().filter(|h| h.owner == owner));

        tracing::debug!(
            "Listed {} of {} habits for user {} (page {})",
            page.items.len(),
            page.total,
            owner,
            query.page()
        );
        Ok(page)
    }

    fn update_habit(
        &self,
        habit_id: HabitId,
        owner: UserId,
        patch: HabitPatch,
    ) -> Result<Habit, StorageError> {
        let mut inner = self.write()?;
        let index = inner
            .position(habit_id, owner)
            .ok_or(StorageError::HabitNotFound { habit_id })?;

        let habit = &mut inner.habits[index];
        habit.apply(patch);

        tracing::debug!("Updated habit: {} ({})", habit.name, habit.id);
        Ok(habit.clone())
    }

    fn delete_habit(&self, habit_id: HabitId, owner: UserId) -> Result<bool, StorageError> {
        let mut inner = self.write()?;
        let index = inner
            .position(habit_id, owner)
            .ok_or(StorageError::HabitNotFound { habit_id })?;

        let removed = inner.habits.remove(index);

        tracing::debug!("Deleted habit: {} ({})", removed.name, removed.id);
        Ok(true)
    }

    fn duplicate_habit(
        &self,
        habit_id: HabitId,
        owner: UserId,
        new_name: String,
    ) -> Result<Habit, StorageError> {
        let mut inner = self.write()?;
        let index = inner
            .position(habit_id, owner)
            .ok_or(StorageError::OriginalNotFound { habit_id })?;

        let copy = inner.habits[index].duplicate_as(new_name, Utc::now());
        let habit = inner.insert(owner, copy);

        if let Some(end_date) = habit.end_date {
            if end_date <= habit.start_date {
                tracing::warn!(
                    "Duplicated habit {} ends at {} which is not after its new start {}",
                    habit.id,
                    end_date.to_rfc3339(),
                    habit.start_date.to_rfc3339()
                );
            }
        }

        tracing::debug!("Duplicated habit {} as: {} ({})", habit_id, habit.name, habit.id);
        Ok(habit)
    }
}
