//! CLI entry point for Postcraft.

use clap::{Parser, Subcommand};

/// Postcraft content studio CLI
#[derive(Parser, Debug)]
#[command(name = "postcraft", version, about = "Postcraft content studio CLI")]
pub struct Cli {
    /// API token (falls back to POSTCRAFT_TOKEN)
    #[arg(long, global = true, env = "POSTCRAFT_TOKEN", default_value = "")]
    pub token: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a chat message and print streamed events
    Chat(ChatArgs),
    /// Wait for a background task to finish
    Wait(WaitArgs),
}

/// Arguments for the `chat` subcommand.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Message to send
    pub message: String,

    /// Continue an existing conversation
    #[arg(long)]
    pub conversation_id: Option<String>,

    /// Target platform (e.g. linkedin, instagram)
    #[arg(short, long)]
    pub platform: Option<String>,
}

/// Arguments for the `wait` subcommand.
#[derive(Parser, Debug)]
pub struct WaitArgs {
    /// Task identifier
    pub task_id: String,

    /// Poll interval in milliseconds (defaults to the configured interval)
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Give up after this many seconds
    #[arg(long)]
    pub max_wait_secs: Option<u64>,
}
