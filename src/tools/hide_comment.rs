//! hide_comment tool implementation
//!
//! The backend exposes a single hide endpoint; whether it also reports the
//! comment as spam is part of the backend contract, not modeled here.

use crate::cli::HideCommentArgs;
use crate::error::{validate_non_empty, AppError};
use crate::mcp::{McpResponse, ToolResult};
use crate::reddit::RedditBackend;
use serde_json::Value;
use tracing::info;

/// Handle hide_comment tool call
pub async fn handle(id: Option<Value>, args: Value, backend: &RedditBackend) -> McpResponse {
    let outcome = match serde_json::from_value::<HideCommentArgs>(args) {
        Ok(args) => execute(backend, args).await,
        Err(e) => Err(AppError::InvalidInput(format!("Invalid arguments: {}", e))),
    };
    McpResponse::tool_outcome(id, outcome)
}

/// Execute hide_comment (shared implementation for MCP and CLI)
///
/// Backend failures are already reduced to a boolean by the client layer;
/// they come back as a fixed failure sentence without the backend detail.
pub async fn execute(
    backend: &RedditBackend,
    args: HideCommentArgs,
) -> Result<ToolResult, AppError> {
    validate_non_empty("commentId", &args.comment_id)?;

    info!("Hiding comment {}", args.comment_id);

    if backend.hide_comment(&args.comment_id).await {
        Ok(ToolResult::text(format!(
            "Successfully hid comment {}",
            args.comment_id
        )))
    } else {
        Ok(ToolResult::error(format!(
            "Failed to hide comment {}",
            args.comment_id
        )))
    }
}
