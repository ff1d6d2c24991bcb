/// Tool for updating existing habits
///
/// This module implements the habit_update MCP tool. Only the fields
/// present in the arguments change; an explicit `null` clears a nullable
/// field.

use chrono::Utc;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domain::{validate_patch, Habit, HabitPatch, UserId};
use crate::response::SuccessResponse;
use crate::storage::{HabitStorage, StorageError};
use crate::tools::{target_id, IdArgument, ToolError};

/// Parameters for updating an existing habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateHabitParams {
    /// Habit ID
    #[schemars(with = "i64")]
    pub id: IdArgument,
    #[serde(flatten)]
    pub patch: HabitPatch,
}

/// Update an existing habit using the provided storage
pub fn update_habit<S: HabitStorage>(
    storage: &S,
    owner: UserId,
    params: UpdateHabitParams,
) -> Result<SuccessResponse<Habit>, ToolError> {
    let habit_id = target_id(params.id)?;

    // Fetch the existing habit so merged-record rules can be checked
    let existing = storage
        .get_habit(habit_id, owner)?
        .ok_or(StorageError::HabitNotFound { habit_id })?;

    validate_patch(&existing, &params.patch, Utc::now())?;

    let habit = storage.update_habit(habit_id, owner, params.patch)?;
    Ok(SuccessResponse::new(habit))
}
