use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for musechat
#[derive(Parser)]
#[command(name = "musechat")]
#[command(about = "MuseChat - OpenRouter chat with local history")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// OpenRouter API key
    #[arg(long, env = "OPENROUTER_API_KEY", value_name = "KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the completion API (e.g. http://localhost:8080/v1)
    #[arg(long, env = "OPENROUTER_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Model id to start with (see `musechat models`)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Directory holding persisted conversations (default: ~/.musechat)
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Directory exports are written to (default: current directory)
    #[arg(long, value_name = "PATH")]
    pub export_dir: Option<PathBuf>,

    /// Log requests and responses
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the selectable free-tier models
    Models,
    /// Export a stored conversation to a JSON file and exit
    Export {
        /// Position in the conversation list (1-based, newest first)
        #[arg(long, default_value_t = 1)]
        index: usize,
    },
}
