/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin, one per line
/// 2. Dispatches tool calls to the habit tools
/// 3. Writes JSON-RPC responses to stdout

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::domain::NewHabit;
use crate::mcp::protocol::*;
use crate::response::{codes, ErrorResponse, SuccessResponse};
use crate::tools::{
    self, DuplicateHabitParams, HabitIdParams, ListHabitsParams, ToolError, UpdateHabitParams,
};
use crate::{HabitTrackerServer, ServerError};

/// MCP server that handles communication with a client
pub struct McpServer {
    /// The underlying habit tracker server
    habit_tracker: HabitTrackerServer,
    /// Whether the client has sent its initialized notification
    initialized: bool,
}

impl McpServer {
    pub fn new(habit_tracker: HabitTrackerServer) -> Self {
        Self {
            habit_tracker,
            initialized: false,
        }
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and notifications.
    pub async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(Value::Null),
                error_codes::INVALID_REQUEST,
                format!("Unsupported JSON-RPC version '{}'", request.jsonrpc),
                None,
            ));
        }

        match request.id.clone() {
            Some(id) => Some(self.handle_request(id, request).await),
            None => {
                self.handle_notification(&request);
                None
            }
        }
    }

    /// Whether the client has completed the initialization handshake
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn handle_notification(&mut self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                info!("MCP client initialized");
            }
            other => debug!("Ignoring notification '{}'", other),
        }
    }

    async fn handle_request(&mut self, id: Value, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(id, request.params),
            "initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(id, Value::Null)
            }
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => respond(id, &json!({ "tools": tool_definitions() })),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        }
    }

    fn handle_initialize(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        match params.map(serde_json::from_value::<InitializeParams>) {
            Some(Ok(params)) => {
                let client = params
                    .client_info
                    .map(|c| format!("{} {}", c.name, c.version.unwrap_or_default()))
                    .unwrap_or_else(|| "unknown client".to_string());
                info!(
                    "MCP client connected: {} (protocol {})",
                    client.trim(),
                    params.protocol_version
                );
            }
            Some(Err(e)) => warn!("Unrecognized initialize parameters: {}", e),
            None => info!("MCP client connected"),
        }

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: ServerInfo {
                name: "Habit Tracker".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        respond(id, &result)
    }

    fn handle_tools_call(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match params.map(serde_json::from_value) {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid parameters: {}", e),
                    None,
                );
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let storage = self.habit_tracker.storage();
        let owner = self.habit_tracker.config().user_id;
        let arguments = Value::Object(tool_params.arguments);

        debug!("Calling tool '{}' for user {}", tool_params.name, owner);

        let result = match tool_params.name.as_str() {
            "habit_list" => call_tool(arguments, |p| tools::list_habits(storage, owner, p)),
            "habit_create" => call_tool(arguments, |p| tools::create_habit(storage, owner, p)),
            "habit_get" => call_tool(arguments, |p| tools::get_habit(storage, owner, p)),
            "habit_update" => call_tool(arguments, |p| tools::update_habit(storage, owner, p)),
            "habit_delete" => call_tool(arguments, |p| tools::delete_habit(storage, owner, p)),
            "habit_duplicate" => {
                call_tool(arguments, |p| tools::duplicate_habit(storage, owner, p))
            }
            _ => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Unknown tool: {}", tool_params.name),
                    None,
                );
            }
        };

        respond(id, &result)
    }
}

/// Deserialize the arguments, run the tool and wrap its envelope
fn call_tool<P, R, F>(arguments: Value, tool: F) -> ToolCallResult
where
    P: DeserializeOwned,
    R: Serialize,
    F: FnOnce(P) -> Result<SuccessResponse<R>, ToolError>,
{
    let outcome = serde_json::from_value(arguments)
        .map_err(ToolError::from)
        .and_then(tool);

    match outcome {
        Ok(response) => match serde_json::to_string(&response) {
            Ok(text) => ToolCallResult::success(text),
            Err(e) => internal_error(&e),
        },
        Err(e) => {
            debug!("Tool call failed: {}", e);
            match serde_json::to_string(&e.to_response()) {
                Ok(text) => ToolCallResult::error(text),
                Err(e) => internal_error(&e),
            }
        }
    }
}

fn internal_error(e: &serde_json::Error) -> ToolCallResult {
    error!("Failed to serialize tool response: {}", e);
    let fallback =
        ErrorResponse::new(codes::INTERNAL_SERVER_ERROR, "An unexpected error occurred", None);
    ToolCallResult::error(serde_json::to_string(&fallback).unwrap_or_default())
}

fn respond<T: Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Failed to serialize result: {}", e),
            None,
        ),
    }
}

fn schema_of<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or_else(|_| json!({ "type": "object" }))
}

/// Tools this server provides, with input schemas derived from their argument types
pub fn tool_definitions() -> Vec<ToolDefinition> {
    let tool = |name: &str, description: &str, input_schema: Value| ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    };

    vec![
        tool(
            "habit_list",
            "List habits, optionally filtered by status, category or frequency, sorted and paged",
            schema_of::<ListHabitsParams>(),
        ),
        tool("habit_create", "Create a new habit to track", schema_of::<NewHabit>()),
        tool("habit_get", "Get a single habit by ID", schema_of::<HabitIdParams>()),
        tool(
            "habit_update",
            "Update an existing habit; only the supplied fields change",
            schema_of::<UpdateHabitParams>(),
        ),
        tool("habit_delete", "Permanently delete a habit", schema_of::<HabitIdParams>()),
        tool(
            "habit_duplicate",
            "Copy an existing habit under a new name, starting today",
            schema_of::<DuplicateHabitParams>(),
        ),
    ]
}
