//! reply_to_comment tool implementation

use crate::cli::ReplyToCommentArgs;
use crate::error::{validate_non_empty, AppError};
use crate::mcp::{McpResponse, ToolResult};
use crate::reddit::RedditBackend;
use serde_json::Value;
use tracing::info;

/// Handle reply_to_comment tool call
pub async fn handle(id: Option<Value>, args: Value, backend: &RedditBackend) -> McpResponse {
    let outcome = match serde_json::from_value::<ReplyToCommentArgs>(args) {
        Ok(args) => execute(backend, args).await,
        Err(e) => Err(AppError::InvalidInput(format!("Invalid arguments: {}", e))),
    };
    McpResponse::tool_outcome(id, outcome)
}

/// Execute reply_to_comment (shared implementation for MCP and CLI)
pub async fn execute(
    backend: &RedditBackend,
    args: ReplyToCommentArgs,
) -> Result<ToolResult, AppError> {
    validate_non_empty("commentId", &args.comment_id)?;
    validate_non_empty("text", &args.text)?;

    info!("Replying to comment {}", args.comment_id);

    match backend.reply_to_comment(&args.comment_id, &args.text).await {
        Some(reply_id) => Ok(ToolResult::text(format!(
            "Successfully replied to comment {} (new comment id: {})",
            args.comment_id, reply_id
        ))),
        None => Ok(ToolResult::error(format!(
            "Failed to reply to comment {}",
            args.comment_id
        ))),
    }
}
