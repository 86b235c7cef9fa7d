//! post_comment tool implementation

use crate::cli::PostCommentArgs;
use crate::error::{validate_non_empty, AppError};
use crate::mcp::{McpResponse, ToolResult};
use crate::reddit::RedditBackend;
use serde_json::Value;
use tracing::info;

/// Handle post_comment tool call
pub async fn handle(id: Option<Value>, args: Value, backend: &RedditBackend) -> McpResponse {
    let outcome = match serde_json::from_value::<PostCommentArgs>(args) {
        Ok(args) => execute(backend, args).await,
        Err(e) => Err(AppError::InvalidInput(format!("Invalid arguments: {}", e))),
    };
    McpResponse::tool_outcome(id, outcome)
}

/// Execute post_comment (shared implementation for MCP and CLI)
pub async fn execute(
    backend: &RedditBackend,
    args: PostCommentArgs,
) -> Result<ToolResult, AppError> {
    validate_non_empty("postId", &args.post_id)?;
    validate_non_empty("text", &args.text)?;

    info!("Commenting on post {}", args.post_id);

    match backend.post_comment(&args.post_id, &args.text).await {
        Some(comment_id) => Ok(ToolResult::text(format!(
            "Successfully commented on post {} (new comment id: {})",
            args.post_id, comment_id
        ))),
        None => Ok(ToolResult::error(format!(
            "Failed to comment on post {}",
            args.post_id
        ))),
    }
}
