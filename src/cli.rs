//! CLI mode implementation
//!
//! Provides a command-line interface for the gateway tools. The argument
//! structs double as the source of the MCP input schemas (via schemars), so
//! CLI flags and tool arguments never drift apart.

use clap::{Parser, Subcommand};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// reddit-relay CLI
#[derive(Parser)]
#[command(name = "reddit-relay")]
#[command(about = "MCP gateway for a hosted Reddit backend", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch recent posts submitted by a Reddit user
    GetUserPosts(UserPostsArgs),
    /// Fetch recent comments made by a Reddit user
    GetUserComments(UserCommentsArgs),
    /// Fetch the comments on a Reddit post
    GetPostComments(PostCommentsArgs),
    /// Hide a comment
    HideComment(HideCommentArgs),
    /// Reply to a comment
    ReplyToComment(ReplyToCommentArgs),
    /// Post a new comment on a post
    PostComment(PostCommentArgs),
    /// Fetch hot posts from a subreddit
    GetHotPosts(ListingArgs),
    /// Fetch new posts from a subreddit
    GetNewPosts(ListingArgs),
    /// Fetch rising posts from a subreddit
    GetRisingPosts(ListingArgs),
}

/// get_user_posts tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserPostsArgs {
    /// Reddit username; omit to use the backend's configured account
    #[arg(short = 'u', long)]
    #[schemars(description = "Reddit username; omit to use the backend's configured account")]
    pub username: Option<String>,

    /// Maximum number of posts to return (1-100, default 25)
    #[arg(short = 'l', long)]
    #[schemars(description = "Maximum number of posts to return (1-100, default 25)")]
    pub limit: Option<u32>,
}

/// get_user_comments tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserCommentsArgs {
    /// Reddit username; omit to use the backend's configured account
    #[arg(short = 'u', long)]
    #[schemars(description = "Reddit username; omit to use the backend's configured account")]
    pub username: Option<String>,

    /// Maximum number of comments to return (1-100, default 25)
    #[arg(short = 'l', long)]
    #[schemars(description = "Maximum number of comments to return (1-100, default 25)")]
    pub limit: Option<u32>,
}

/// get_post_comments tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PostCommentsArgs {
    /// Id of the post to fetch comments for
    #[arg(short = 'p', long)]
    #[schemars(description = "Id of the post to fetch comments for")]
    pub post_id: String,

    /// Subreddit the post belongs to, when known
    #[arg(short = 's', long)]
    #[schemars(description = "Subreddit the post belongs to, when known")]
    pub subreddit: Option<String>,
}

/// hide_comment tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HideCommentArgs {
    /// Id of the comment to hide
    #[arg(short = 'c', long)]
    #[schemars(description = "Id of the comment to hide")]
    pub comment_id: String,
}

/// reply_to_comment tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ReplyToCommentArgs {
    /// Id of the comment to reply to
    #[arg(short = 'c', long)]
    #[schemars(description = "Id of the comment to reply to")]
    pub comment_id: String,

    /// Reply text
    #[arg(short = 't', long)]
    #[schemars(description = "Reply text")]
    pub text: String,
}

/// post_comment tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PostCommentArgs {
    /// Id of the post to comment on
    #[arg(short = 'p', long)]
    #[schemars(description = "Id of the post to comment on")]
    pub post_id: String,

    /// Comment text
    #[arg(short = 't', long)]
    #[schemars(description = "Comment text")]
    pub text: String,
}

/// Shared arguments for the hot/new/rising listing tools
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ListingArgs {
    /// Subreddit to list posts from
    #[arg(short = 's', long)]
    #[schemars(description = "Subreddit to list posts from")]
    pub subreddit: String,

    /// Maximum number of posts to return (1-100, default 25)
    #[arg(short = 'l', long)]
    #[schemars(description = "Maximum number of posts to return (1-100, default 25)")]
    pub limit: Option<u32>,
}
