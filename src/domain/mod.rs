/// Domain module containing core business logic and data types
///
/// This module defines the Habit entity, its creation and update inputs,
/// and the validation rules every input passes before it reaches the store.

pub mod habit;
pub mod types;
pub mod validation;

// Re-export public types for easy access
pub use habit::*;
pub use types::*;
pub use validation::{validate_habit_name, validate_list_query, validate_new, validate_patch};

use serde::Serialize;
use thiserror::Error;

/// A single rule violation, addressed by the wire name of the offending field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation failed: {}", summarize(.issues))]
    Validation { issues: Vec<ValidationIssue> },
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{}: {}", issue.path, issue.message))
        .collect::<Vec<_>>()
        .join("; ")
}
