/// MCP tools for habit management
///
/// Each tool mirrors one endpoint of the habit API: it validates its
/// arguments, calls the store on behalf of the configured user and returns
/// a success envelope, or a `ToolError` that maps onto an error envelope.

pub mod create;
pub mod delete;
pub mod duplicate;
pub mod get;
pub mod list;
pub mod update;

// Re-export tool functions for easy access
pub use create::*;
pub use delete::*;
pub use duplicate::*;
pub use get::*;
pub use list::*;
pub use update::*;

use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use thiserror::Error;

use crate::domain::{DomainError, HabitId, ValidationIssue};
use crate::response::{codes, ErrorResponse};
use crate::storage::StorageError;

/// Errors a tool call can end in
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),

    #[error("Invalid habit ID")]
    InvalidId,

    /// A numeric id no habit can have
    #[error("Habit {0} not found")]
    UnknownId(i64),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ToolError {
    /// Error envelope reported to the client for this error
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            ToolError::InvalidArguments(e) => ErrorResponse::new(
                codes::VALIDATION_ERROR,
                "Validation failed",
                Some(json!([{ "path": "", "message": e.to_string() }])),
            ),
            ToolError::InvalidId => ErrorResponse::new(codes::INVALID_ID, "Invalid habit ID", None),
            ToolError::UnknownId(_) => {
                ErrorResponse::new(codes::NOT_FOUND, "Habit not found", None)
            }
            ToolError::Domain(DomainError::Validation { issues }) => ErrorResponse::new(
                codes::VALIDATION_ERROR,
                "Validation failed",
                serde_json::to_value(issues).ok(),
            ),
            ToolError::Storage(StorageError::HabitNotFound { .. }) => {
                ErrorResponse::new(codes::NOT_FOUND, "Habit not found", None)
            }
            ToolError::Storage(StorageError::OriginalNotFound { .. }) => {
                ErrorResponse::new(codes::NOT_FOUND, "Original habit not found", None)
            }
            ToolError::Storage(StorageError::LockPoisoned) => ErrorResponse::new(
                codes::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred",
                None,
            ),
        }
    }
}

/// Habit id as sent by a client
///
/// Read the way an integer path segment is: a number is truncated, a
/// string contributes its leading integer. Anything else is not a number
/// and is kept as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdArgument(pub Option<i64>);

impl From<i64> for IdArgument {
    fn from(id: i64) -> Self {
        Self(Some(id))
    }
}

impl<'de> Deserialize<'de> for IdArgument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let id = match &value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
            Value::String(s) => leading_integer(s),
            _ => None,
        };
        Ok(Self(id))
    }
}

/// Optional sign followed by at least one digit, after leading whitespace
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let digits = unsigned.len() - unsigned.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let sign_len = s.len() - unsigned.len();
    s[..sign_len + digits].parse().ok()
}

/// Id of a habit to read or delete
///
/// Non-positive ids name no habit.
pub(crate) fn lookup_id(id: IdArgument) -> Result<HabitId, ToolError> {
    match id.0 {
        None => Err(ToolError::InvalidId),
        Some(n) => u64::try_from(n)
            .ok()
            .filter(|&n| n > 0)
            .map(HabitId)
            .ok_or(ToolError::UnknownId(n)),
    }
}

/// Id of a habit to change or copy; a non-positive id fails validation
pub(crate) fn target_id(id: IdArgument) -> Result<HabitId, ToolError> {
    match lookup_id(id) {
        Err(ToolError::UnknownId(_)) => Err(DomainError::Validation {
            issues: vec![ValidationIssue::new("id", "Habit id must be a positive integer")],
        }
        .into()),
        other => other,
    }
}
