use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "ragdesk")]
#[command(about = "Desktop chat companion for a KNet retrieval-augmented answering service")]
#[command(version)]
struct Cli {
    /// Path to the reports database (defaults to ~/.ragdesk/reports.db)
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the chat page GUI
    Gui,

    /// Show recently submitted issue reports
    Reports {
        /// Maximum number of reports to print
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    // KN_ENDPOINT selects the KNet service; flags override the rest
    let mut config = ragdesk::config::Config::from_env();
    if let Some(db_path) = cli.db_path {
        config.db_path = db_path;
    }

    match cli.command {
        Some(Commands::Reports { limit }) => {
            cli::reports::reports_command(&config, limit)?;
        }
        Some(Commands::Gui) | None => {
            ragdesk::gui::run_gui(config)?;
        }
    }

    Ok(())
}
