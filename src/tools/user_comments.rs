//! get_user_comments tool implementation

use crate::cli::UserCommentsArgs;
use crate::error::{validate_limit, AppError};
use crate::mcp::{McpResponse, ToolResult};
use crate::reddit::RedditBackend;
use serde_json::Value;
use tracing::info;

/// Handle get_user_comments tool call
pub async fn handle(id: Option<Value>, args: Value, backend: &RedditBackend) -> McpResponse {
    let outcome = match serde_json::from_value::<UserCommentsArgs>(args) {
        Ok(args) => execute(backend, args).await,
        Err(e) => Err(AppError::InvalidInput(format!("Invalid arguments: {}", e))),
    };
    McpResponse::tool_outcome(id, outcome)
}

/// Execute get_user_comments (shared implementation for MCP and CLI)
pub async fn execute(
    backend: &RedditBackend,
    args: UserCommentsArgs,
) -> Result<ToolResult, AppError> {
    let limit = validate_limit(args.limit)?;

    info!(
        "Fetching up to {} comments for user {}",
        limit,
        args.username.as_deref().unwrap_or("<default>")
    );

    let comments = backend
        .user_comments(args.username.as_deref(), limit)
        .await?;
    Ok(ToolResult::text(serde_json::to_string_pretty(&comments)?))
}
