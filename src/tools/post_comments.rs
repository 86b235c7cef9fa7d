//! get_post_comments tool implementation
//!
//! The backend returns the comment tree with whatever nesting it supports;
//! replies are passed through without being parsed here.

use crate::cli::PostCommentsArgs;
use crate::error::{validate_non_empty, AppError};
use crate::mcp::{McpResponse, ToolResult};
use crate::reddit::RedditBackend;
use serde_json::Value;
use tracing::info;

/// Handle get_post_comments tool call
pub async fn handle(id: Option<Value>, args: Value, backend: &RedditBackend) -> McpResponse {
    let outcome = match serde_json::from_value::<PostCommentsArgs>(args) {
        Ok(args) => execute(backend, args).await,
        Err(e) => Err(AppError::InvalidInput(format!("Invalid arguments: {}", e))),
    };
    McpResponse::tool_outcome(id, outcome)
}

/// Execute get_post_comments (shared implementation for MCP and CLI)
pub async fn execute(
    backend: &RedditBackend,
    args: PostCommentsArgs,
) -> Result<ToolResult, AppError> {
    validate_non_empty("postId", &args.post_id)?;

    info!("Fetching comments for post {}", args.post_id);

    let comments = backend
        .post_comments(&args.post_id, args.subreddit.as_deref())
        .await?;
    Ok(ToolResult::text(serde_json::to_string_pretty(&comments)?))
}
