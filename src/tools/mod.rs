//! MCP tools implementation

pub mod hide_comment;
pub mod listings;
pub mod post_comment;
pub mod post_comments;
pub mod reply_to_comment;
pub mod user_comments;
pub mod user_posts;
