//! NepFit CLI - seed file checks and catalog queries.
//!
//! # Usage
//!
//! ```bash
//! # Validate a seed file before starting the storefront
//! nepfit seed check data/seed.json
//!
//! # Search the seed catalog the way GET /products does
//! nepfit catalog search --seed data/seed.json -q yoga --sort priceLowToHigh
//!
//! # List category picker options
//! nepfit catalog categories --seed data/seed.json
//! ```
//!
//! `--seed` falls back to `NEPFIT_SEED_PATH` (a `.env` file is honoured).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "nepfit")]
#[command(author, version, about = "NepFit CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the catalog in a seed file
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Work with seed files
    Seed {
        #[command(subcommand)]
        action: SeedAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Search, filter and sort products
    Search {
        /// Seed file (defaults to `NEPFIT_SEED_PATH`)
        #[arg(short, long)]
        seed: Option<PathBuf>,

        /// Case-insensitive name substring
        #[arg(short, long, default_value = "")]
        query: String,

        /// Category label, or `All`
        #[arg(short, long, default_value = "All")]
        category: String,

        /// Sort key (`name`, `priceLowToHigh`, `priceHighToLow`)
        #[arg(long, default_value = "name")]
        sort: String,
    },
    /// List category picker options
    Categories {
        /// Seed file (defaults to `NEPFIT_SEED_PATH`)
        #[arg(short, long)]
        seed: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum SeedAction {
    /// Parse a seed file and report problems
    Check {
        /// Path to the seed JSON file
        path: PathBuf,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Search {
                seed,
                query,
                category,
                sort,
            } => {
                let path = commands::seed_path(seed)?;
                print_lines(&commands::catalog::search(&path, &query, &category, &sort)?);
            }
            CatalogAction::Categories { seed } => {
                let path = commands::seed_path(seed)?;
                print_lines(&commands::catalog::categories(&path)?);
            }
        },
        Commands::Seed { action } => match action {
            SeedAction::Check { path } => commands::seed::check(&path)?,
        },
    }
    Ok(())
}
