use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use musechat_api::{OpenRouterClient, OPENROUTER_API_URL};
use musechat_chat::ChatManager;
use musechat_logging::get_musechat_dir;
use musechat_models::find_model;
use musechat_store::JsonFileStore;

use crate::cli::Cli;

/// Resolved application configuration
pub struct AppConfig {
    pub api_key: String,
    pub api_url: String,
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    pub verbose: bool,
}

/// Resolve configuration from CLI flags and environment
pub fn setup_from_cli(cli: &Cli, require_key: bool) -> Result<AppConfig> {
    let api_key = match &cli.api_key {
        Some(key) => key.clone(),
        None if require_key => {
            bail!("No API key configured. Set OPENROUTER_API_KEY or pass --api-key")
        }
        None => String::new(),
    };

    let api_url = cli
        .api_url
        .clone()
        .unwrap_or_else(|| OPENROUTER_API_URL.to_string());

    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => get_musechat_dir().context("Failed to resolve data directory")?,
    };

    let export_dir = match &cli.export_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("Failed to resolve export directory")?,
    };

    Ok(AppConfig {
        api_key,
        api_url,
        data_dir,
        export_dir,
        verbose: cli.verbose,
    })
}

/// Build the chat manager the REPL and subcommands drive
pub fn build_manager(cli: &Cli, config: &AppConfig) -> ChatManager {
    let client = OpenRouterClient::with_base_url(config.api_key.clone(), config.api_url.clone())
        .app_title("MuseChat")
        .verbose(config.verbose);
    let store = Arc::new(JsonFileStore::new(config.data_dir.join("conversations.json")));

    let mut manager = ChatManager::new(Arc::new(client), store, config.export_dir.clone());

    if let Some(model) = &cli.model {
        if find_model(model).is_none() {
            eprintln!(
                "{} {} is not in the free-model registry; using it anyway",
                "⚠️".yellow(),
                model
            );
        }
        manager.set_selected_model(model.clone());
    }

    manager
}
