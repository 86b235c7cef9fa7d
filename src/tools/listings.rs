//! Subreddit listing tools (get_hot_posts / get_new_posts / get_rising_posts)
//!
//! The three tools differ only in the backend endpoint they hit; they share
//! one implementation parameterized by ListingKind.

use crate::cli::ListingArgs;
use crate::error::{validate_limit, validate_non_empty, AppError};
use crate::mcp::{McpResponse, ToolResult};
use crate::reddit::{ListingKind, RedditBackend};
use serde_json::Value;
use tracing::info;

/// Handle a listing tool call
pub async fn handle(
    id: Option<Value>,
    args: Value,
    backend: &RedditBackend,
    kind: ListingKind,
) -> McpResponse {
    let outcome = match serde_json::from_value::<ListingArgs>(args) {
        Ok(args) => execute(backend, kind, args).await,
        Err(e) => Err(AppError::InvalidInput(format!("Invalid arguments: {}", e))),
    };
    McpResponse::tool_outcome(id, outcome)
}

/// Execute a listing tool (shared implementation for MCP and CLI)
pub async fn execute(
    backend: &RedditBackend,
    kind: ListingKind,
    args: ListingArgs,
) -> Result<ToolResult, AppError> {
    validate_non_empty("subreddit", &args.subreddit)?;
    let limit = validate_limit(args.limit)?;

    info!(
        "Fetching up to {} {} posts from r/{}",
        limit,
        kind.label(),
        args.subreddit
    );

    let posts = backend.listing(kind, &args.subreddit, limit).await?;
    Ok(ToolResult::text(serde_json::to_string_pretty(&posts)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_empty_listing_is_success_not_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/reddit/mcp/hot-posts"))
            .and(body_json(json!({ "subreddit": "programming", "limit": 5 })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "posts": [] })),
            )
            .mount(&server)
            .await;

        let backend = RedditBackend::new(&Config::new("k", server.uri()));
        let args = ListingArgs {
            subreddit: "programming".to_string(),
            limit: Some(5),
        };
        let result = execute(&backend, ListingKind::Hot, args).await.unwrap();
        assert!(!result.is_error);
        let parsed: Value = serde_json::from_str(&result.content[0].text).unwrap();
        assert_eq!(parsed, json!([]));
    }

    #[tokio::test]
    async fn test_rising_uses_its_own_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/reddit/mcp/rising-posts"))
            .and(body_json(json!({ "subreddit": "rust", "limit": 25 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "posts": [{ "id": "p1", "title": "rising", "score": 10 }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let backend = RedditBackend::new(&Config::new("k", server.uri()));
        let args = ListingArgs {
            subreddit: "rust".to_string(),
            limit: None,
        };
        let result = execute(&backend, ListingKind::Rising, args)
            .await
            .unwrap();
        let parsed: Value = serde_json::from_str(&result.content[0].text).unwrap();
        assert_eq!(parsed[0]["id"], "p1");
    }

    #[tokio::test]
    async fn test_backend_failure_surfaces_as_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/reddit/mcp/new-posts"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let backend = RedditBackend::new(&Config::new("k", server.uri()));
        let args = ListingArgs {
            subreddit: "rust".to_string(),
            limit: None,
        };
        let err = execute(&backend, ListingKind::New, args).await.unwrap_err();
        assert!(err.message().contains("new-posts"));
        assert!(err.message().contains("503"));
    }
}
