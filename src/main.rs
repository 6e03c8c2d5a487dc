//! To-do MCP Server - Main Entry Point
//!
//! This is the main entry point for the to-do MCP server application.
//! The actual implementation is in the `todo_mcp` library.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use mcp_attr::server::serve_stdio;
use todo_mcp::TodoServerHandler;
use tracing_subscriber::EnvFilter;

/// To-do MCP Server - task list with categories, priorities and filtered views via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the to-do data file
    #[arg(required_unless_present = "in_memory")]
    file: Option<String>,

    /// Log level written to stderr (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Keep all data in memory and never write a file
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    let args = Args::parse();

    // stdout carries the MCP transport, so logs go to stderr
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&args.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let handler = match (&args.file, args.in_memory) {
        (Some(file), false) => {
            tracing::info!(file = %file, "starting to-do server");
            TodoServerHandler::new(file).await?
        }
        _ => {
            tracing::info!("starting in-memory to-do server");
            TodoServerHandler::in_memory().await?
        }
    };

    serve_stdio(handler).await?;
    Ok(())
}
