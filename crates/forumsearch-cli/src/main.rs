//! forumsearch CLI
//!
//! Command-line front end for the forum search pipeline

use clap::{Parser, Subcommand};
use forumsearch_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "forumsearch")]
#[command(about = "forumsearch - validated, parameterized forum search", long_about = None)]
struct Cli {
    /// Logging profile (development, production); logs go to stderr
    #[arg(long, global = true)]
    log_profile: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a search and print the retained rows
    Search(commands::search::SearchArgs),
    /// Append one line to the search log
    Log(commands::log::LogArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.log_profile {
        Some(profile) => logging_facility::init(profile),
        None if std::env::var_os("RUST_LOG").is_some() => {
            logging_facility::init(Profile::Development)
        }
        None => {}
    }

    let result = match cli.command {
        Commands::Search(args) => commands::search::execute(args),
        Commands::Log(args) => commands::log::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
