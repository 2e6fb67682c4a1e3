use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// matchline: chat with the creator-matching service from a terminal.
#[derive(Parser, Debug)]
#[command(name = "matchline", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base address override (e.g. http://localhost:8000).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Log level or filter directive (debug, info, matchline_chat=trace, ...).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// Start an interactive chat session (default).
    #[default]
    Chat,
    /// Probe the service health endpoint.
    Health,
}

pub fn parse() -> Args {
    Args::parse()
}
