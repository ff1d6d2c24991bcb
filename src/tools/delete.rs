/// Tool for deleting habits

use serde::Serialize;

use crate::domain::UserId;
use crate::response::SuccessResponse;
use crate::storage::HabitStorage;
use crate::tools::{lookup_id, HabitIdParams, ToolError};

#[derive(Debug, Serialize)]
pub struct DeleteHabitResponse {
    pub deleted: bool,
}

/// Permanently delete a habit
pub fn delete_habit<S: HabitStorage>(
    storage: &S,
    owner: UserId,
    params: HabitIdParams,
) -> Result<SuccessResponse<DeleteHabitResponse>, ToolError> {
    let habit_id = lookup_id(params.id)?;
    let deleted = storage.delete_habit(habit_id, owner)?;

    Ok(SuccessResponse::new(DeleteHabitResponse { deleted }))
}
