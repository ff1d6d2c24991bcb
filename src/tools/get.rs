/// Tool for fetching a single habit

use schemars::JsonSchema;
use serde::Deserialize;

use crate::domain::{Habit, UserId};
use crate::response::SuccessResponse;
use crate::storage::{HabitStorage, StorageError};
use crate::tools::{lookup_id, IdArgument, ToolError};

/// Arguments naming a single habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct HabitIdParams {
    /// Habit ID
    #[schemars(with = "i64")]
    pub id: IdArgument,
}

/// Get a habit; a habit of another user counts as missing
pub fn get_habit<S: HabitStorage>(
    storage: &S,
    owner: UserId,
    params: HabitIdParams,
) -> Result<SuccessResponse<Habit>, ToolError> {
    let habit_id = lookup_id(params.id)?;

    match storage.get_habit(habit_id, owner)? {
        Some(habit) => Ok(SuccessResponse::new(habit)),
        None => Err(StorageError::HabitNotFound { habit_id }.into()),
    }
}
