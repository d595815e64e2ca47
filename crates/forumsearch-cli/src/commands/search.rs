//! Search command
//!
//! Usage: forumsearch search [--searchid ID] [--do MODE] [--query TEXT] [--q TEXT] [--field KEY=VALUE]...

use clap::{Args, ValueEnum};
use forumsearch_core::model::RequestFields;
use forumsearch_core::render::{JsonLinesRenderer, PlainTextRenderer};
use forumsearch_engine::run_search;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// `column=value` pairs, tab-separated
    #[default]
    Text,
    /// One JSON object per row
    Json,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Stored search result id
    #[arg(long)]
    pub searchid: Option<String>,

    /// Legacy mode field (`showResults` / `process`)
    #[arg(long = "do")]
    pub mode: Option<String>,

    /// Query text as typed by the user
    #[arg(long)]
    pub query: Option<String>,

    /// Text to search post bodies for
    #[arg(long)]
    pub q: Option<String>,

    /// Extra request field; `name[key]=value` builds a nested field
    #[arg(long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,

    /// Read the request from a JSON object; flags are applied on top
    #[arg(long)]
    pub request_json: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Store DSN (overrides config)
    #[arg(long)]
    pub db: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Append the query text to the search log
    #[arg(long)]
    pub log_queries: bool,

    /// Search log path (overrides config)
    #[arg(long)]
    pub search_log: Option<PathBuf>,

    /// Print store error details instead of a generic message
    #[arg(long)]
    pub expose_errors: bool,
}

/// Execute search command
pub fn execute(args: SearchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(args.config.as_deref())?;
    if let Some(dsn) = &args.db {
        config.store.dsn = dsn.clone();
    }
    if let Some(path) = &args.search_log {
        config.search_log.path = path.clone();
    }
    config.search_log.enabled |= args.log_queries;
    config.expose_store_errors |= args.expose_errors;
    config.validate()?;

    let request = build_request(&args)?;

    let stdout = std::io::stdout();
    let outcome = match args.format {
        OutputFormat::Text => {
            let mut renderer = PlainTextRenderer::new(stdout.lock());
            let outcome = run_search(request, &config, &mut renderer);
            renderer.finish()?;
            outcome
        }
        OutputFormat::Json => {
            let mut renderer = JsonLinesRenderer::new(stdout.lock());
            let outcome = run_search(request, &config, &mut renderer);
            renderer.finish()?;
            outcome
        }
    }
    .map_err(|e| e.public_message(config.expose_store_errors))?;

    if let Some(err) = &outcome.log_error {
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "warning: {}", err)?;
    }

    Ok(())
}

fn build_request(args: &SearchArgs) -> Result<RequestFields, Box<dyn std::error::Error>> {
    let mut request = match &args.request_json {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        }
        None => RequestFields::new(),
    };

    for pair in &args.fields {
        request.insert_pair(pair)?;
    }

    let named = [
        ("searchid", &args.searchid),
        ("do", &args.mode),
        ("query", &args.query),
        ("q", &args.q),
    ];
    for (name, value) in named {
        if let Some(value) = value {
            request.insert(name, value.as_str());
        }
    }

    Ok(request)
}
