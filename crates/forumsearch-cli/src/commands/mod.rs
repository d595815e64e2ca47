pub mod log;
pub mod search;

use forumsearch_core::config::SearchConfig;
use std::path::Path;

/// Config file (or defaults) with environment overrides applied
pub fn load_config(path: Option<&Path>) -> Result<SearchConfig, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => SearchConfig::from_file(path)?,
        None => SearchConfig::default(),
    };
    config.apply_env_overrides()?;
    Ok(config)
}
