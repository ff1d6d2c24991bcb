/// Tool for duplicating habits
///
/// The copy gets a new id, the given name, a start date of now and the
/// default status; every other field is taken from the original.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::domain::{validate_habit_name, Habit, UserId};
use crate::response::SuccessResponse;
use crate::storage::HabitStorage;
use crate::tools::{target_id, IdArgument, ToolError};

/// Parameters for duplicating a habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DuplicateHabitParams {
    /// ID of the habit to copy
    #[schemars(with = "i64")]
    pub id: IdArgument,
    /// Name of the new habit, 3-50 characters
    #[serde(rename = "nomeNovoHabito")]
    pub new_name: String,
}

pub fn duplicate_habit<S: HabitStorage>(
    storage: &S,
    owner: UserId,
    params: DuplicateHabitParams,
) -> Result<SuccessResponse<Habit>, ToolError> {
    let habit_id = target_id(params.id)?;
    validate_habit_name(&params.new_name)?;

    let habit = storage.duplicate_habit(habit_id, owner, params.new_name)?;
    Ok(SuccessResponse::new(habit))
}
