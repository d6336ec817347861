//! # aiml-chat
//!
//! Terminal chat client for the AI/ML API.
//!
//! ## Features
//! - Single prompt mode with `-p` or `--prompt`
//! - Interactive terminal UI (TUI) with a searchable model catalog
//! - Catalog search, model selection, and history management subcommands

mod cli;
mod core;
mod run;
mod tui;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use cli::{Args, Commands, ConfigSubcommand, HistorySubcommand};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);
    log::debug!("{} {}", core::app::NAME, core::app::VERSION);

    if let Some(command) = args.command {
        match command {
            Commands::Config { subcommand } => match subcommand {
                Some(ConfigSubcommand::SetApiKey { api_key }) => {
                    core::cli::run_config_set_api_key(api_key)
                }
                None => core::cli::run_config(),
            },
            Commands::Models {
                query,
                limit,
                json,
                no_color,
            } => core::cli::run_models(
                &query,
                &core::cli::ModelsOptions {
                    limit,
                    json,
                    no_color,
                },
            ),
            Commands::Select { model_id } => core::cli::run_select(&model_id),
            Commands::History { subcommand } => match subcommand {
                HistorySubcommand::List { query, limit } => {
                    core::cli::run_history_list(query.as_deref(), limit)
                }
                HistorySubcommand::Show { id } => core::cli::run_history_show(&id),
                HistorySubcommand::Rename { id, label } => {
                    core::cli::run_history_rename(&id, &label)
                }
                HistorySubcommand::Delete { id } => core::cli::run_history_delete(&id),
            },
            Commands::Completions { shell } => {
                cli::generate(
                    shell,
                    &mut Args::command(),
                    core::app::NAME,
                    &mut std::io::stdout(),
                );
            }
        }
        return Ok(());
    }

    // Print user-friendly message; exit uses Display not Debug
    let config = core::config::load().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if let Some(ref prompt) = args.prompt {
        if let Err(e) = run::run_single_prompt(prompt, args.model.as_deref(), &config).await {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    let catalog = core::catalog::load().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    run::launch_tui(config, catalog).await
}
