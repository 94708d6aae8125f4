//! Benchhand CLI - the main entry point.
//!
//! Commands:
//! - `onboard` - Initialize config, workspace and bundled tools
//! - `chat`    - Interactive session or single-message mode
//! - `tools`   - List dispatchable tools without starting a session
//! - `doctor`  - Diagnose configuration and workspace health

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "benchhand",
    about = "Benchhand - a single-operator agent that runs local tools",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration, workspace and bundled tools
    Onboard,

    /// Chat with the agent
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// List installed tools
    Tools,

    /// Diagnose configuration and workspace health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::Tools => commands::tools::run().await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
