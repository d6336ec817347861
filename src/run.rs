//! Application run modes: logger init, single prompt, TUI launch.

use std::io;
use std::sync::Arc;

use crate::cli::Args;
use crate::core;
use crate::core::catalog::ModelDescriptor;
use crate::core::config::Config;
use crate::core::llm::{self, CompletionRequest};
use crate::core::message::ChatMessage;

/// Initialize env_logger. In TUI mode, writes to file to avoid corrupting the display.
pub fn init_logger(args: &Args) {
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()));

    if args.is_tui() {
        let log_path = core::paths::cache_dir().and_then(|dir| {
            std::fs::create_dir_all(&dir).ok()?;
            Some(dir.join(format!("{}.log", core::app::NAME)))
        });
        if let Some(path) = log_path
            && let Ok(file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
        {
            logger.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }
    let _ = logger.try_init();
}

/// Run single prompt mode: send one user message, print the reply to stdout.
pub async fn run_single_prompt(
    prompt_arg: &str,
    model: Option<&str>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let prompt = if prompt_arg == "-" {
        io::read_to_string(io::stdin())?
    } else {
        prompt_arg.to_string()
    };
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(Box::new(io::Error::new(
            io::ErrorKind::InvalidInput,
            "empty prompt",
        )));
    }

    let model = model.unwrap_or(&config.model_id);
    log::info!("Single prompt with model {}", model);
    let messages = [ChatMessage::user(prompt)];
    let reply = llm::complete(
        CompletionRequest {
            config,
            model,
            messages: &messages,
        },
        None,
    )
    .await?;
    println!("{}", reply);
    Ok(())
}

/// Launch the TUI in a blocking thread. Returns on panic or IO error.
pub async fn launch_tui(
    config: Config,
    catalog: Vec<ModelDescriptor>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(config);
    let join_result: Result<io::Result<()>, tokio::task::JoinError> =
        tokio::task::spawn_blocking(move || crate::tui::run(config, catalog)).await;

    match join_result {
        Ok(io_result) => io_result?,
        Err(join_err) => {
            if let Ok(panic) = join_err.try_into_panic() {
                let msg = if let Some(s) = panic.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic.downcast_ref::<String>() {
                    s.clone()
                } else {
                    format!("{:?}", panic)
                };
                log::error!("TUI panic: {}", msg);
                eprintln!("TUI panic: {}", msg);
            }
            return Err(Box::new(io::Error::other("TUI thread panicked")));
        }
    }
    Ok(())
}
