//! VoxTask CLI - voice- and text-driven task list
//!
//! Speaks the small JSON API of the VoxTask server: free-form utterances are
//! classified into add/complete commands, everything else is plain CRUD.

mod api;
mod commands;
mod config;
mod output;
mod recognizer;
mod repl;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// VoxTask CLI - voice notes to tasks
#[derive(Parser)]
#[command(name = "vox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Voice- and text-driven task list")]
#[command(long_about = r#"
VoxTask turns natural phrasing into task commands.

Examples:
  vox                              # Interactive session
  vox say "add task buy milk"      # One-shot command
  vox say "mark buy milk as done"  # Fuzzy-matched completion
  vox list                         # Show all tasks
"#)]
struct Cli {
    /// Server URL (overrides the config file)
    #[arg(long, env = "VOXTASK_SERVER_URL")]
    server: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all tasks
    List,

    /// Create a new task
    Add {
        /// Task title
        title: Vec<String>,
    },

    /// Toggle a task's completion flag
    Toggle {
        /// Task id
        id: Uuid,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: Uuid,
    },

    /// Remove all completed tasks
    ClearCompleted,

    /// Run an utterance through the command interpreter
    Say {
        /// The utterance, as it would have been spoken
        utterance: Vec<String>,
    },

    /// Capture one command through the recognition engine
    Listen,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("vox_cli={},warn", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = config::Config::load()?;
    let server_url = cli
        .server
        .clone()
        .unwrap_or_else(|| config.server.url.clone());

    let api = api::ApiClient::new(&server_url);
    let output = output::OutputHandler::new(config.display.show_stats);

    match cli.command {
        Some(Commands::List) => {
            commands::list_tasks(&api, &output).await?;
        }
        Some(Commands::Add { title }) => {
            commands::add_task(&api, &output, &title.join(" ")).await?;
        }
        Some(Commands::Toggle { id }) => {
            commands::toggle_task(&api, &output, id).await?;
        }
        Some(Commands::Delete { id }) => {
            commands::delete_task(&api, &output, id).await?;
        }
        Some(Commands::ClearCompleted) => {
            commands::clear_completed(&api, &output).await?;
        }
        Some(Commands::Say { utterance }) => {
            commands::say(&api, &output, &utterance.join(" ")).await?;
        }
        Some(Commands::Listen) => {
            commands::listen(&api, &output).await?;
        }
        None => {
            let mut config = config;
            if let Some(url) = cli.server {
                config.server.url = url;
            }
            let mut repl = repl::VoxRepl::new(api, config)?;
            repl.run().await?;
        }
    }

    Ok(())
}
