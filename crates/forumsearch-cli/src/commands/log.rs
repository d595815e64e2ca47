//! Log command
//!
//! Usage: forumsearch log --text <TEXT> [--search-log <FILE>]

use clap::Args;
use forumsearch_store::log_search;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Line to append, written as-is
    #[arg(long)]
    pub text: String,

    /// Search log path (overrides config)
    #[arg(long)]
    pub search_log: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Execute log command
pub fn execute(args: LogArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(args.config.as_deref())?;
    let path = args.search_log.unwrap_or(config.search_log.path);

    log_search(&args.text, &path)?;
    Ok(())
}
