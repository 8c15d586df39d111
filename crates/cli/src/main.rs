//! Folio CLI - talk to the portfolio assistant and send contact requests.
//!
//! # Usage
//!
//! ```bash
//! # Interactive chat session
//! folio chat
//!
//! # One question, one answer
//! folio ask "What projects have you shipped?"
//!
//! # Send a contact request
//! folio contact --first-name Ada --email ada@example.com --description "ML pipeline"
//! ```
//!
//! # Environment Variables
//!
//! - `CHATBOT_API_URL` - Chat service base URL
//! - `EMAIL_API_URL` - Contact relay base URL
//! - `CHAT_TIMEOUT_SECS` - Chat request timeout

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Folio portfolio assistant and contact form")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Chat,
    /// Ask the assistant a single question
    Ask {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Send a contact request
    Contact(commands::contact::ContactArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let config = folio_client::ClientConfig::from_env()?;

    match cli.command {
        Commands::Chat => commands::chat::interactive(&config).await?,
        Commands::Ask { text } => commands::chat::ask(&config, &text.join(" ")).await?,
        Commands::Contact(args) => commands::contact::send(&config, args).await?,
    }
    Ok(())
}
