//! MCP (Model Context Protocol) handling module
//!
//! This module implements the JSON-RPC 2.0 protocol for MCP communication.
//! Tool execution failures are reported as results with `isError: true`;
//! JSON-RPC errors are reserved for protocol-level failures.

use crate::error::AppError;
use crate::reddit::{ListingKind, RedditBackend};
use crate::tools;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader as AsyncBufReader};
use tracing::{debug, error, info, warn};

/// MCP JSON-RPC 2.0 request structure
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    /// JSON-RPC version field - required by spec but not accessed in code
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

/// Initialize request parameters
#[derive(Debug, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "clientInfo")]
    pub client_info: Option<ClientInfo>,
}

/// Client information
#[derive(Debug, Deserialize, Clone)]
pub struct ClientInfo {
    pub name: Option<String>,
    #[allow(dead_code)]
    pub version: Option<String>,
}

/// MCP JSON-RPC 2.0 response structure
#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

/// MCP Error structure
#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: String,
    pub message: String,
}

/// MCP Tool call arguments
#[derive(Debug, Deserialize)]
pub struct ToolCallArgs {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// MCP Content item
#[derive(Debug, Serialize)]
pub struct ContentItem {
    pub r#type: String,
    pub text: String,
}

/// MCP Tool result envelope
///
/// `isError` is absent from the wire when false.
#[derive(Debug, Serialize)]
pub struct ToolResult {
    pub content: Vec<ContentItem>,
    #[serde(rename = "isError", skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl McpResponse {
    /// Create a successful response
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Option<Value>, code: &str, message: &str) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(McpError {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }

    /// Wrap a tool outcome: failures become `isError` results, not
    /// JSON-RPC errors
    pub fn tool_outcome(id: Option<Value>, outcome: Result<ToolResult, AppError>) -> Self {
        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                warn!("Tool call failed ({}): {}", e.error_code(), e);
                ToolResult::error(e.message())
            }
        };
        Self::success(id, serde_json::to_value(result).unwrap())
    }
}

impl ToolResult {
    /// Create a text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(content)],
            is_error: false,
        }
    }

    /// Create a failed result with a human-readable message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(message)],
            is_error: true,
        }
    }
}

impl ContentItem {
    /// Helper to create plain text content
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            r#type: "text".to_string(),
            text: content.into(),
        }
    }
}

/// Parse MCP request from JSON string
pub fn parse_request(json: &str) -> Result<McpRequest> {
    let request: McpRequest = serde_json::from_str(json)?;
    Ok(request)
}

/// Serialize MCP response to JSON string
pub fn serialize_response(response: &McpResponse) -> Result<String> {
    Ok(serde_json::to_string(response)?)
}

/// Handle stdio MCP communication
pub async fn handle_stdio(backend: RedditBackend) -> Result<()> {
    info!("Starting reddit-relay MCP server on stdio");

    let stdin = tokio::io::stdin();
    let mut reader = AsyncBufReader::new(stdin).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = reader.next_line().await? {
        debug!("Received request: {}", line);

        let response = match parse_request(&line) {
            Ok(request) => handle_request(request, &backend).await,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                McpResponse::error(None, "parse_error", &format!("Invalid JSON: {}", e))
            }
        };

        let response_json = serialize_response(&response)?;
        debug!("Sending response: {}", response_json);

        stdout.write_all(response_json.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    Ok(())
}

/// Handle a single MCP request
pub async fn handle_request(request: McpRequest, backend: &RedditBackend) -> McpResponse {
    match request.method.as_str() {
        "initialize" => handle_initialize(request).await,
        "tools/call" => handle_tool_call(request, backend).await,
        "tools/list" => handle_tools_list(request).await,
        _ => McpResponse::error(
            request.id,
            "method_not_found",
            &format!("Method '{}' not found", request.method),
        ),
    }
}

/// Handle tools/call method
async fn handle_tool_call(request: McpRequest, backend: &RedditBackend) -> McpResponse {
    let args: ToolCallArgs = match serde_json::from_value(request.params.unwrap_or_default()) {
        Ok(args) => args,
        Err(e) => {
            return McpResponse::error(
                request.id.clone(),
                "invalid_params",
                &format!("Invalid parameters: {}", e),
            )
        }
    };

    info!("Tool call: {}", args.name);

    let id = request.id;
    let arguments = args.arguments;

    match args.name.as_str() {
        "get_user_posts" => tools::user_posts::handle(id, arguments, backend).await,
        "get_user_comments" => tools::user_comments::handle(id, arguments, backend).await,
        "get_post_comments" => tools::post_comments::handle(id, arguments, backend).await,
        "hide_comment" => tools::hide_comment::handle(id, arguments, backend).await,
        "reply_to_comment" => tools::reply_to_comment::handle(id, arguments, backend).await,
        "post_comment" => tools::post_comment::handle(id, arguments, backend).await,
        "get_hot_posts" => {
            tools::listings::handle(id, arguments, backend, ListingKind::Hot).await
        }
        "get_new_posts" => {
            tools::listings::handle(id, arguments, backend, ListingKind::New).await
        }
        "get_rising_posts" => {
            tools::listings::handle(id, arguments, backend, ListingKind::Rising).await
        }
        _ => McpResponse::error(
            id,
            "tool_not_found",
            &format!("Tool '{}' not found", args.name),
        ),
    }
}

/// Handle tools/list method
async fn handle_tools_list(request: McpRequest) -> McpResponse {
    let tools = build_tools_array();

    McpResponse::success(request.id, serde_json::json!({ "tools": tools }))
}

/// Handle initialize method
async fn handle_initialize(request: McpRequest) -> McpResponse {
    if let Some(params) = request.params {
        if let Ok(init_params) = serde_json::from_value::<InitializeParams>(params) {
            let client_name = init_params
                .client_info
                .and_then(|info| info.name)
                .unwrap_or_else(|| "Unknown Client".to_string());
            info!("Client initializing: {}", client_name);
        }
    }

    let result = serde_json::json!({
        "serverInfo": {
            "name": "reddit-relay",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "capabilities": {
            "tools": { "list": true, "call": true }
        },
        "tools": build_tools_array()
    });
    McpResponse::success(request.id, result)
}

/// Build the tools array returned from tools/list and initialize
fn build_tools_array() -> Value {
    use crate::cli::{
        HideCommentArgs, ListingArgs, PostCommentArgs, PostCommentsArgs, ReplyToCommentArgs,
        UserCommentsArgs, UserPostsArgs,
    };
    use schemars::schema_for;

    // Generate JSON schemas from the CLI argument structs
    let user_posts_schema = schema_for!(UserPostsArgs);
    let user_comments_schema = schema_for!(UserCommentsArgs);
    let post_comments_schema = schema_for!(PostCommentsArgs);
    let hide_comment_schema = schema_for!(HideCommentArgs);
    let reply_schema = schema_for!(ReplyToCommentArgs);
    let post_comment_schema = schema_for!(PostCommentArgs);
    // Shared by the three listing tools
    let listing_schema = serde_json::to_value(schema_for!(ListingArgs)).unwrap_or_default();

    serde_json::json!([
        {
            "name": "get_user_posts",
            "title": "Get User Posts",
            "description": "Fetch recent posts submitted by a Reddit user",
            "inputSchema": user_posts_schema
        },
        {
            "name": "get_user_comments",
            "title": "Get User Comments",
            "description": "Fetch recent comments made by a Reddit user",
            "inputSchema": user_comments_schema
        },
        {
            "name": "get_post_comments",
            "title": "Get Post Comments",
            "description": "Fetch the comments on a Reddit post",
            "inputSchema": post_comments_schema
        },
        {
            "name": "hide_comment",
            "title": "Hide Comment",
            "description": "Hide a comment on Reddit",
            "inputSchema": hide_comment_schema
        },
        {
            "name": "reply_to_comment",
            "title": "Reply to Comment",
            "description": "Reply to a Reddit comment",
            "inputSchema": reply_schema
        },
        {
            "name": "post_comment",
            "title": "Post Comment",
            "description": "Post a new top-level comment on a Reddit post",
            "inputSchema": post_comment_schema
        },
        {
            "name": "get_hot_posts",
            "title": "Get Hot Posts",
            "description": "Fetch hot posts from a subreddit",
            "inputSchema": listing_schema.clone()
        },
        {
            "name": "get_new_posts",
            "title": "Get New Posts",
            "description": "Fetch new posts from a subreddit",
            "inputSchema": listing_schema.clone()
        },
        {
            "name": "get_rising_posts",
            "title": "Get Rising Posts",
            "description": "Fetch rising posts from a subreddit",
            "inputSchema": listing_schema
        }
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    fn offline_backend() -> RedditBackend {
        // Port 1 is never listening; protocol-level tests never reach it
        RedditBackend::new(&Config::new("test-key", "http://127.0.0.1:1"))
    }

    fn request(method: &str, params: Option<Value>) -> McpRequest {
        McpRequest {
            jsonrpc: "2.0".into(),
            id: Some(json!(1)),
            method: method.into(),
            params,
        }
    }

    #[tokio::test]
    async fn test_initialize_response_contains_fields() {
        let backend = offline_backend();
        let resp = handle_request(request("initialize", None), &backend).await;
        assert!(resp.error.is_none());
        let result = resp.result.expect("result present");
        assert_eq!(
            result
                .get("serverInfo")
                .and_then(|v| v.get("name"))
                .and_then(|v| v.as_str()),
            Some("reddit-relay")
        );
        assert_eq!(
            result
                .get("capabilities")
                .and_then(|v| v.get("tools"))
                .and_then(|v| v.get("call"))
                .and_then(|v| v.as_bool()),
            Some(true)
        );
    }

    #[tokio::test]
    async fn test_tools_list_contains_all_nine_tools() {
        let backend = offline_backend();
        let resp = handle_request(request("tools/list", None), &backend).await;
        assert!(resp.error.is_none());
        let result = resp.result.expect("result present");
        let tools = result
            .get("tools")
            .and_then(|v| v.as_array())
            .expect("tools array");
        let names: Vec<&str> = tools
            .iter()
            .filter_map(|t| t.get("name").and_then(|n| n.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                "get_user_posts",
                "get_user_comments",
                "get_post_comments",
                "hide_comment",
                "reply_to_comment",
                "post_comment",
                "get_hot_posts",
                "get_new_posts",
                "get_rising_posts",
            ]
        );
        for tool in tools {
            assert!(tool.get("inputSchema").is_some());
            assert!(tool.get("description").is_some());
        }
    }

    #[tokio::test]
    async fn test_unknown_method_is_a_protocol_error() {
        let backend = offline_backend();
        let resp = handle_request(request("resources/list", None), &backend).await;
        let error = resp.error.expect("error present");
        assert_eq!(error.code, "method_not_found");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_a_protocol_error() {
        let backend = offline_backend();
        let params = json!({ "name": "get_saved_posts", "arguments": {} });
        let resp = handle_request(request("tools/call", Some(params)), &backend).await;
        let error = resp.error.expect("error present");
        assert_eq!(error.code, "tool_not_found");
    }

    #[tokio::test]
    async fn test_invalid_limit_is_an_is_error_result() {
        let backend = offline_backend();
        let params = json!({
            "name": "get_user_posts",
            "arguments": { "limit": 500 }
        });
        let resp = handle_request(request("tools/call", Some(params)), &backend).await;
        assert!(resp.error.is_none());
        let result = resp.result.expect("result present");
        assert_eq!(result["isError"].as_bool(), Some(true));
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("limit"));
    }

    #[test]
    fn test_tool_result_serialization() {
        let ok = serde_json::to_value(ToolResult::text("done")).unwrap();
        assert!(ok.get("isError").is_none());
        assert_eq!(ok["content"][0]["type"], "text");

        let failed = serde_json::to_value(ToolResult::error("nope")).unwrap();
        assert_eq!(failed["isError"].as_bool(), Some(true));
    }

    #[test]
    fn test_tool_failures_are_visible_at_warn_level() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone)]
        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl Write for Capture {
            fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(data);
                Ok(data.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let capture = Capture(Arc::new(Mutex::new(Vec::new())));
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let _ = McpResponse::tool_outcome(
                Some(json!(1)),
                Err(AppError::NetworkError("connection refused".to_string())),
            );
        });

        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Tool call failed"));
        assert!(output.contains("connection refused"));
    }

    #[test]
    fn test_parse_request_rejects_invalid_json() {
        assert!(parse_request("{not json").is_err());
        assert!(parse_request(r#"{"jsonrpc":"2.0","method":"x"}"#).is_ok());
    }
}
