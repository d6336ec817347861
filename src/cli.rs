//! CLI definitions: argument parsing, subcommands, and help text.

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  aiml-chat                          Launch interactive TUI
  aiml-chat -p \"explain X\"           Single prompt, print the reply to stdout
  aiml-chat -p -                     Read prompt from stdin
  aiml-chat models gpt mini          Search the model catalog
  aiml-chat select gpt-4o-mini       Use a model for future chats
  aiml-chat config                   Show config paths and status
  aiml-chat history list             List conversations
  aiml-chat completions bash         Generate bash completions
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Chat with models from the AI/ML API catalog",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Send a single prompt then exit (without opening the TUI)
    #[arg(
        short = 'p',
        long,
        help = "Provide a prompt to get an immediate AI response (use '-' to read from stdin)"
    )]
    pub prompt: Option<String>,

    /// Override model for single prompt mode
    #[arg(
        short = 'm',
        long,
        help = "Model ID (e.g. mistralai/Mistral-7B-Instruct-v0.2)"
    )]
    pub model: Option<String>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show config paths, model, and API key status
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Search the model catalog (all models when no query is given)
    Models {
        /// Free-text query, ranked across name, id, organization, description...
        query: Vec<String>,
        /// Maximum number of models to show
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Disable match highlighting
        #[arg(long)]
        no_color: bool,
    },
    /// Select the model used for chats
    Select {
        /// Model ID as listed by `models`
        model_id: String,
    },
    /// Manage conversation history
    History {
        #[command(subcommand)]
        subcommand: HistorySubcommand,
    },
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Store the API key in the config directory (reads stdin when omitted)
    SetApiKey {
        api_key: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum HistorySubcommand {
    /// List conversations
    List {
        /// Only conversations whose label or messages contain this text
        #[arg(long)]
        query: Option<String>,
        /// Maximum number of conversations to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Print a conversation
    Show { id: String },
    /// Rename a conversation
    Rename { id: String, label: String },
    /// Delete a conversation
    Delete { id: String },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }

    /// Whether this invocation opens the TUI.
    pub fn is_tui(&self) -> bool {
        self.command.is_none() && self.prompt.is_none()
    }
}
