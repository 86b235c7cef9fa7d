//! Reddit backend client
//!
//! All real Reddit access lives in a hosted backend service; this client
//! maps each gateway operation onto exactly one HTTP call against it,
//! authenticated with a bearer API key. Read operations propagate failures
//! to the caller; mutations swallow them here (logged) and report a
//! negative sentinel instead.
//!
//! Posts and comments are carried as opaque JSON: the gateway neither
//! validates nor re-shapes what the backend returns, so fields it does not
//! know about survive the round trip. Only the listing `posts` envelope and
//! the mutation id fields are typed, because those are actually consumed.

use crate::config::Config;
use crate::error::AppError;
use crate::http::client_with_timeout;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Subreddit listing flavors exposed as separate tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    Hot,
    New,
    Rising,
}

impl ListingKind {
    /// Backend endpoint name for this listing
    pub fn endpoint(self) -> &'static str {
        match self {
            ListingKind::Hot => "hot-posts",
            ListingKind::New => "new-posts",
            ListingKind::Rising => "rising-posts",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ListingKind::Hot => "hot",
            ListingKind::New => "new",
            ListingKind::Rising => "rising",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListingResponse {
    #[serde(default)]
    posts: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplyCreated {
    reply_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentCreated {
    comment_id: Option<String>,
}

/// Client for the hosted Reddit backend
pub struct RedditBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RedditBackend {
    /// Create a new backend client from startup configuration
    pub fn new(config: &Config) -> Self {
        Self {
            client: client_with_timeout(Duration::from_secs(30)),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/api/reddit/mcp/{}", self.base_url, endpoint)
    }

    /// Fetch a user's recent posts
    pub async fn user_posts(
        &self,
        username: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Value>, AppError> {
        self.get("user-posts", &user_params(username, limit)).await
    }

    /// Fetch a user's recent comments
    pub async fn user_comments(
        &self,
        username: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Value>, AppError> {
        self.get("user-comments", &user_params(username, limit))
            .await
    }

    /// Fetch the comments on a post
    pub async fn post_comments(
        &self,
        post_id: &str,
        subreddit: Option<&str>,
    ) -> Result<Vec<Value>, AppError> {
        let mut params = vec![("postId".to_string(), post_id.to_string())];
        if let Some(s) = subreddit {
            params.push(("subreddit".to_string(), s.to_string()));
        }
        self.get("post-comments", &params).await
    }

    /// Fetch a subreddit listing (hot/new/rising)
    pub async fn listing(
        &self,
        kind: ListingKind,
        subreddit: &str,
        limit: u32,
    ) -> Result<Vec<Value>, AppError> {
        let body = serde_json::json!({ "subreddit": subreddit, "limit": limit });
        let response: ListingResponse = self.post(kind.endpoint(), &body).await?;
        Ok(response.posts)
    }

    /// Hide a comment; failures are logged and reported as `false`
    pub async fn hide_comment(&self, comment_id: &str) -> bool {
        let body = serde_json::json!({ "commentId": comment_id });
        match self.post_status_only("hide-comment", &body).await {
            Ok(()) => true,
            Err(e) => {
                warn!("hide-comment call failed: {}", e);
                false
            }
        }
    }

    /// Reply to a comment; failures are logged and reported as an absent id
    pub async fn reply_to_comment(&self, comment_id: &str, text: &str) -> Option<String> {
        let body = serde_json::json!({ "commentId": comment_id, "text": text });
        match self.post::<ReplyCreated>("reply-comment", &body).await {
            Ok(created) => created.reply_id,
            Err(e) => {
                warn!("reply-comment call failed: {}", e);
                None
            }
        }
    }

    /// Comment on a post; failures are logged and reported as an absent id
    pub async fn post_comment(&self, post_id: &str, text: &str) -> Option<String> {
        let body = serde_json::json!({ "postId": post_id, "text": text });
        match self.post::<CommentCreated>("post-comment", &body).await {
            Ok(created) => created.comment_id,
            Err(e) => {
                warn!("post-comment call failed: {}", e);
                None
            }
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<T, AppError> {
        let url = self.url(endpoint);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(params)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| request_error(endpoint, e))?;

        Self::decode(endpoint, response).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Value,
    ) -> Result<T, AppError> {
        let response = self.send_post(endpoint, body).await?;
        Self::decode(endpoint, response).await
    }

    /// POST where only the status matters; the response body is discarded
    async fn post_status_only(&self, endpoint: &str, body: &Value) -> Result<(), AppError> {
        let response = self.send_post(endpoint, body).await?;
        Self::check_status(endpoint, response).await?;
        Ok(())
    }

    async fn send_post(
        &self,
        endpoint: &str,
        body: &Value,
    ) -> Result<reqwest::Response, AppError> {
        let url = self.url(endpoint);
        debug!("POST {}", url);

        self.client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body)
            .send()
            .await
            .map_err(|e| request_error(endpoint, e))
    }

    async fn decode<T: DeserializeOwned>(
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        let response = Self::check_status(endpoint, response).await?;
        response.json().await.map_err(|e| {
            AppError::ParseError(format!("Failed to parse {} response: {}", endpoint, e))
        })
    }

    async fn check_status(
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, AppError> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::ApiError(format!(
                "{} returned {}: {}",
                endpoint, status, text
            )));
        }
        Ok(response)
    }
}

fn request_error(endpoint: &str, err: reqwest::Error) -> AppError {
    let msg = format!("Request to {} failed: {}", endpoint, err);
    if err.is_timeout() {
        AppError::Timeout(msg)
    } else {
        AppError::NetworkError(msg)
    }
}

fn user_params(username: Option<&str>, limit: u32) -> Vec<(String, String)> {
    let mut params = vec![("limit".to_string(), limit.to_string())];
    if let Some(u) = username {
        params.push(("username".to_string(), u.to_string()));
    }
    params
}
