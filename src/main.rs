//! reddit-relay MCP Server & CLI
//!
//! Dual-mode application:
//! - MCP Server Mode (default): Model Context Protocol server using stdio
//! - CLI Mode: Command-line utility for direct tool execution
//!
//! Every tool forwards one HTTP call to a hosted backend that holds the
//! actual Reddit credentials; the `REDDIT_RELAY_API_KEY` environment
//! variable authenticates against that backend and is required at startup.

mod cli;
mod config;
mod error;
mod http;
mod mcp;
mod reddit;
mod tools;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::AppError;
use mcp::ToolResult;
use reddit::{ListingKind, RedditBackend};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Detect mode: CLI if args present, MCP server otherwise
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        run_cli_mode().await
    } else {
        run_mcp_mode().await
    }
}

/// Run in CLI mode
async fn run_cli_mode() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    let command = match cli.command {
        Some(command) => command,
        None => {
            eprintln!("Error: No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    let backend = match Config::from_env() {
        Ok(config) => RedditBackend::new(&config),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match command {
        Commands::GetUserPosts(args) => tools::user_posts::execute(&backend, args).await,
        Commands::GetUserComments(args) => tools::user_comments::execute(&backend, args).await,
        Commands::GetPostComments(args) => tools::post_comments::execute(&backend, args).await,
        Commands::HideComment(args) => tools::hide_comment::execute(&backend, args).await,
        Commands::ReplyToComment(args) => tools::reply_to_comment::execute(&backend, args).await,
        Commands::PostComment(args) => tools::post_comment::execute(&backend, args).await,
        Commands::GetHotPosts(args) => {
            tools::listings::execute(&backend, ListingKind::Hot, args).await
        }
        Commands::GetNewPosts(args) => {
            tools::listings::execute(&backend, ListingKind::New, args).await
        }
        Commands::GetRisingPosts(args) => {
            tools::listings::execute(&backend, ListingKind::Rising, args).await
        }
    };

    // Handle result and exit with appropriate code
    match result {
        Ok(tool_result) if tool_result.is_error => {
            eprintln!("Error: {}", result_text(&tool_result));
            std::process::exit(2);
        }
        Ok(tool_result) => {
            println!("{}", result_text(&tool_result));
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

/// Extract the text payload from a ToolResult
fn result_text(result: &ToolResult) -> String {
    result
        .content
        .first()
        .map(|c| c.text.clone())
        .unwrap_or_default()
}

/// Map AppError to exit code
fn get_exit_code(err: &AppError) -> i32 {
    match err {
        AppError::InvalidInput(_) | AppError::ConfigError(_) => 1,
        AppError::NetworkError(_) | AppError::ApiError(_) => 2,
        AppError::Timeout(_) => 4,
        AppError::ParseError(_) | AppError::Internal(_) => 5,
    }
}

/// Run in MCP server mode
async fn run_mcp_mode() -> Result<()> {
    // Logs go to stderr; stdout carries JSON-RPC only
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    info!("Starting reddit-relay MCP Server");

    // The API key is required; refuse to serve without it
    let config = Config::from_env()?;
    let backend = RedditBackend::new(&config);

    mcp::handle_stdio(backend).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(get_exit_code(&AppError::InvalidInput("x".into())), 1);
        assert_eq!(get_exit_code(&AppError::ConfigError("x".into())), 1);
        assert_eq!(get_exit_code(&AppError::NetworkError("x".into())), 2);
        assert_eq!(get_exit_code(&AppError::ApiError("x".into())), 2);
        assert_eq!(get_exit_code(&AppError::Timeout("x".into())), 4);
        assert_eq!(get_exit_code(&AppError::Internal("x".into())), 5);
    }

    #[test]
    fn test_result_text_extraction() {
        let result = ToolResult::text("payload");
        assert_eq!(result_text(&result), "payload");
    }
}
