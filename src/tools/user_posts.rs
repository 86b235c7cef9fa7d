//! get_user_posts tool implementation
//!
//! Fetches a user's recent submissions through the backend and returns them
//! as pretty-printed JSON.

use crate::cli::UserPostsArgs;
use crate::error::{validate_limit, AppError};
use crate::mcp::{McpResponse, ToolResult};
use crate::reddit::RedditBackend;
use serde_json::Value;
use tracing::info;

/// Handle get_user_posts tool call
pub async fn handle(id: Option<Value>, args: Value, backend: &RedditBackend) -> McpResponse {
    let outcome = match serde_json::from_value::<UserPostsArgs>(args) {
        Ok(args) => execute(backend, args).await,
        Err(e) => Err(AppError::InvalidInput(format!("Invalid arguments: {}", e))),
    };
    McpResponse::tool_outcome(id, outcome)
}

/// Execute get_user_posts (shared implementation for MCP and CLI)
pub async fn execute(
    backend: &RedditBackend,
    args: UserPostsArgs,
) -> Result<ToolResult, AppError> {
    let limit = validate_limit(args.limit)?;

    info!(
        "Fetching up to {} posts for user {}",
        limit,
        args.username.as_deref().unwrap_or("<default>")
    );

    let posts = backend.user_posts(args.username.as_deref(), limit).await?;
    Ok(ToolResult::text(serde_json::to_string_pretty(&posts)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_omitted_limit_reaches_backend_as_25() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/reddit/mcp/user-posts"))
            .and(query_param("limit", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let backend = RedditBackend::new(&Config::new("k", server.uri()));
        let args = UserPostsArgs {
            username: None,
            limit: None,
        };
        let result = execute(&backend, args).await.unwrap();
        assert!(!result.is_error);
    }

    #[tokio::test]
    async fn test_success_is_pretty_printed_post_array() {
        let server = MockServer::start().await;
        // Includes a field outside the documented Post shape; it must
        // survive the round trip untouched
        let posts = json!([
            { "id": "p1", "title": "one", "score": 1, "flair": "meta" },
            { "id": "p2", "title": "two", "score": 2 },
            { "id": "p3", "title": "three", "score": 3 }
        ]);
        Mock::given(method("GET"))
            .and(path("/api/reddit/mcp/user-posts"))
            .and(query_param("username", "alice"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(posts.clone()))
            .mount(&server)
            .await;

        let backend = RedditBackend::new(&Config::new("k", server.uri()));
        let args = UserPostsArgs {
            username: Some("alice".to_string()),
            limit: Some(10),
        };
        let result = execute(&backend, args).await.unwrap();
        assert!(!result.is_error);

        let text = &result.content[0].text;
        // Pretty-printed (multi-line) and round-trips to the same 3 posts
        assert!(text.contains('\n'));
        let round: Value = serde_json::from_str(text).unwrap();
        assert_eq!(round, posts);
        assert_eq!(round[0]["flair"], "meta");
    }

    #[tokio::test]
    async fn test_out_of_range_limit_never_calls_backend() {
        let backend = RedditBackend::new(&Config::new("k", "http://127.0.0.1:1"));
        let args = UserPostsArgs {
            username: Some("alice".to_string()),
            limit: Some(0),
        };
        let err = execute(&backend, args).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
