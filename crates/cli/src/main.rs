//! BrickMon CLI - Database migrations and catalog imports.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! bm-cli migrate
//!
//! # Import a product feed into the catalog
//! bm-cli seed --file feeds/products.yaml
//!
//! # Import a feed, removing products no longer in it
//! bm-cli seed --file feeds/products.yaml --replace
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Import products from a YAML feed

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bm-cli")]
#[command(author, version, about = "BrickMon CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Import products from a YAML feed
    Seed {
        /// Path to the YAML feed file
        #[arg(short, long)]
        file: String,

        /// Remove products that are not present in the feed
        #[arg(long)]
        replace: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file, replace } => {
            commands::seed::run(&file, replace).await?;
        }
    }
    Ok(())
}
