/// Tool for creating new habits
///
/// This module implements the habit_create MCP tool.

use chrono::Utc;

use crate::domain::{validate_new, Habit, NewHabit, UserId};
use crate::response::SuccessResponse;
use crate::storage::HabitStorage;
use crate::tools::ToolError;

/// Create a new habit using the provided storage
pub fn create_habit<S: HabitStorage>(
    storage: &S,
    owner: UserId,
    params: NewHabit,
) -> Result<SuccessResponse<Habit>, ToolError> {
    validate_new(&params, Utc::now())?;

    let habit = storage.create_habit(owner, params)?;
    Ok(SuccessResponse::new(habit))
}
