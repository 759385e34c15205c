//! Shopping list CLI - Database migrations and seeding.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! shopping-cli migrate
//!
//! # Create lists and items from a YAML file
//! shopping-cli seed data/groceries.yaml
//!
//! # Replace every existing list with the file's contents
//! shopping-cli seed data/groceries.yaml --clear
//! ```
//!
//! Both commands read `SHOPPING_DATABASE_URL` (or `DATABASE_URL`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "shopping-cli")]
#[command(author, version, about = "Shopping list CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed shopping lists and items from a YAML file
    Seed {
        /// Path to the YAML seed file
        file: PathBuf,

        /// Delete all existing lists (and their items) first
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed { file, clear } => commands::seed::run(&file, clear).await,
    }
}
