/// Response envelopes returned to clients
///
/// Successful calls produce `{ success: true, data, metadata? }`, failed
/// calls `{ success: false, error: { code, message, details? }, timestamp }`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Machine-readable error codes carried in error envelopes
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INVALID_ID: &str = "INVALID_ID";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Pagination details attached to list responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl<T> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            metadata: None,
        }
    }
}

/// Wrap one page of a listing with its pagination metadata
pub fn list_response<T>(
    items: Vec<T>,
    page: u32,
    page_size: u32,
    total: usize,
) -> SuccessResponse<Vec<T>> {
    SuccessResponse {
        success: true,
        data: items,
        metadata: Some(Metadata {
            page: Some(page),
            page_size: Some(page_size),
            total: Some(total),
            timestamp: Utc::now(),
        }),
    }
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                code: code.to_string(),
                message: message.into(),
                details,
            },
            timestamp: Utc::now(),
        }
    }
}
