use anyhow::Result;
use clap::Parser;
use colored::Colorize;

mod app;
mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // If a subcommand was provided, execute it and exit
    if let Some(command) = &cli.command {
        match command {
            Commands::Models => {
                app::repl::print_models();
                return Ok(());
            }
            Commands::Export { index } => {
                // Export reads the stored conversations; no API key needed
                let config = app::setup::setup_from_cli(&cli, false)?;
                let manager = app::setup::build_manager(&cli, &config);

                let id = index
                    .checked_sub(1)
                    .and_then(|pos| manager.state().conversations.get(pos))
                    .map(|c| c.id);
                let Some(id) = id else {
                    anyhow::bail!(
                        "No conversation at position {} ({} stored)",
                        index,
                        manager.state().conversations.len()
                    );
                };

                if let Some(path) = manager.export_conversation(id)? {
                    println!("{} Exported to {}", "✓".green(), path.display());
                }
                return Ok(());
            }
        }
    }

    let config = app::setup::setup_from_cli(&cli, true)?;
    let manager = app::setup::build_manager(&cli, &config);
    app::repl::run_repl(manager).await
}
