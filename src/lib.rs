/// Public library interface for the Habit Tracker server
///
/// This module exports the server implementation and the public types
/// that can be used by other applications or tests.

use thiserror::Error;

// Internal modules
mod config;
mod domain;
mod mcp;
mod response;
mod storage;
mod tools;

// Re-export public modules and types
pub use config::ServerConfig;
pub use domain::*;
pub use mcp::{JsonRpcResponse, McpServer};
pub use response::{codes, ErrorBody, ErrorResponse, Metadata, SuccessResponse};
pub use storage::{
    HabitPage, HabitStorage, ListQuery, MemoryStorage, StorageError, DEFAULT_PAGE_SIZE,
};
pub use tools::{
    create_habit, delete_habit, duplicate_habit, get_habit, list_habits, update_habit,
    DeleteHabitResponse, DuplicateHabitParams, HabitIdParams, IdArgument, ListHabitsParams,
    ToolError, UpdateHabitParams,
};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main habit tracker server
///
/// Owns the in-memory habit store for the lifetime of the process and
/// serves it over the MCP protocol.
pub struct HabitTrackerServer {
    storage: MemoryStorage,
    config: ServerConfig,
}

impl HabitTrackerServer {
    /// Create a new habit tracker server with an empty store
    pub fn new(config: ServerConfig) -> Self {
        tracing::info!("Initializing Habit Tracker server for user {}", config.user_id);

        Self {
            storage: MemoryStorage::new(),
            config,
        }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin is closed or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        let mut mcp_server = McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Get a reference to the storage layer (useful for testing)
    pub fn storage(&self) -> &MemoryStorage {
        &self.storage
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
