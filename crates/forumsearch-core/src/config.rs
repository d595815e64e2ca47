//! Search configuration
//!
//! Loaded from TOML; environment variables override individual keys.
//! Every field has a default so an empty file is a valid configuration.

use crate::errors::{Result, SearchError};
use crate::render::{CategoryFilter, CategoryId};
use crate::rules::{Constraint, UnknownFields, ValidationRule, ValidationRules};
use crate::types::Sensitive;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_STORE_DSN: &str = "FORUMSEARCH_STORE_DSN";
pub const ENV_STORE_USER: &str = "FORUMSEARCH_STORE_USER";
pub const ENV_STORE_PASSWORD: &str = "FORUMSEARCH_STORE_PASSWORD";
pub const ENV_EXCLUDED_CATEGORY: &str = "FORUMSEARCH_EXCLUDED_CATEGORY";
pub const ENV_SEARCH_LOG: &str = "FORUMSEARCH_SEARCH_LOG";

/// Store connection settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path, `sqlite://<path>`, or `file:` URI
    pub dsn: String,
    pub user: Option<String>,
    pub password: Option<Sensitive<String>>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dsn: "forum.db".to_string(),
            user: None,
            password: None,
        }
    }
}

/// Excluded-category filter settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub column: String,
    /// `None` disables filtering
    pub excluded: Option<CategoryId>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            column: "forumid".to_string(),
            excluded: Some(5),
        }
    }
}

/// Search log settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchLogConfig {
    pub path: PathBuf,
    /// Append each request's query text during `run_search`
    pub enabled: bool,
}

impl Default for SearchLogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/var/www/search_log.txt"),
            enabled: false,
        }
    }
}

/// One row of the `[[rules]]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleConfig {
    pub field: String,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub store: StoreConfig,
    pub filter: FilterConfig,
    pub search_log: SearchLogConfig,
    /// Return store error text to the requester instead of a generic message
    pub expose_store_errors: bool,
    pub unknown_fields: UnknownFields,
    pub rules: Vec<RuleConfig>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let rules = ValidationRules::default()
            .iter()
            .map(|(field, rule)| RuleConfig {
                field: field.to_string(),
                constraints: rule.constraints().to_vec(),
            })
            .collect();

        Self {
            store: StoreConfig::default(),
            filter: FilterConfig::default(),
            search_log: SearchLogConfig::default(),
            expose_store_errors: false,
            unknown_fields: UnknownFields::PassThrough,
            rules,
        }
    }
}

impl SearchConfig {
    /// Load from a TOML file
    ///
    /// Environment overrides are applied separately via `apply_env_overrides()`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| SearchError::Config {
            message: format!(
                "failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SearchConfig = toml::from_str(content).map_err(|e| SearchError::Config {
            message: format!("failed to parse config: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `FORUMSEARCH_*` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dsn) = lookup(ENV_STORE_DSN) {
            self.store.dsn = dsn;
        }
        if let Some(user) = lookup(ENV_STORE_USER) {
            self.store.user = Some(user);
        }
        if let Some(password) = lookup(ENV_STORE_PASSWORD) {
            self.store.password = Some(Sensitive::new(password));
        }
        if let Some(raw) = lookup(ENV_EXCLUDED_CATEGORY) {
            let raw = raw.trim();
            self.filter.excluded = if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(raw.parse().map_err(|_| SearchError::Config {
                    message: format!("invalid {} value: {}", ENV_EXCLUDED_CATEGORY, raw),
                })?)
            };
        }
        if let Some(path) = lookup(ENV_SEARCH_LOG) {
            self.search_log.path = PathBuf::from(path);
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.store.dsn.trim().is_empty() {
            return Err(SearchError::Config {
                message: "store.dsn cannot be empty".to_string(),
            });
        }
        if self.filter.column.trim().is_empty() {
            return Err(SearchError::Config {
                message: "filter.column cannot be empty".to_string(),
            });
        }
        if let Some(rule) = self.rules.iter().find(|r| r.field.trim().is_empty()) {
            return Err(SearchError::Config {
                message: format!("rule with empty field name: {:?}", rule.constraints),
            });
        }
        Ok(())
    }

    /// The rule table, in configured order
    pub fn validation_rules(&self) -> ValidationRules {
        self.rules
            .iter()
            .fold(ValidationRules::new(), |rules, rule| {
                rules.with_rule(
                    rule.field.clone(),
                    ValidationRule::from_constraints(rule.constraints.iter().copied()),
                )
            })
            .with_unknown_fields(self.unknown_fields)
    }

    pub fn category_filter(&self) -> CategoryFilter {
        CategoryFilter::new(self.filter.column.clone(), self.filter.excluded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_toml_is_default() {
        let config = SearchConfig::from_toml_str("").unwrap();
        assert_eq!(config, SearchConfig::default());
        assert_eq!(config.validation_rules(), ValidationRules::default());
        assert_eq!(config.category_filter(), CategoryFilter::default());
    }

    #[test]
    fn test_full_toml() {
        let config = SearchConfig::from_toml_str(
            r#"
            expose_store_errors = true
            unknown_fields = "reject"

            [store]
            dsn = "sqlite:///srv/forum.db"
            user = "forum"
            password = "123456"

            [filter]
            column = "categoryid"
            excluded = 9

            [search_log]
            path = "/tmp/search.log"
            enabled = true

            [[rules]]
            field = "q"
            constraints = ["string", "required"]
            "#,
        )
        .unwrap();

        assert!(config.expose_store_errors);
        assert_eq!(config.store.user.as_deref(), Some("forum"));
        assert_eq!(
            config.store.password.as_ref().map(|p| p.expose().as_str()),
            Some("123456")
        );
        assert!(!format!("{:?}", config).contains("123456"));
        assert_eq!(config.category_filter(), CategoryFilter::new("categoryid", Some(9)));
        assert!(config.search_log.enabled);

        let rules = config.validation_rules();
        assert_eq!(rules.len(), 1);
        assert!(rules.get("q").unwrap().is_required());
        assert_eq!(rules.unknown_fields(), UnknownFields::Reject);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = SearchConfig::from_toml_str("store = 3").unwrap_err();
        assert!(matches!(err, SearchError::Config { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_STORE_DSN, "/data/forum.db"),
            (ENV_STORE_PASSWORD, "secret"),
            (ENV_EXCLUDED_CATEGORY, "none"),
            (ENV_SEARCH_LOG, "/tmp/x.log"),
        ]
        .into_iter()
        .collect();

        let mut config = SearchConfig::default();
        config
            .apply_overrides_from(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.store.dsn, "/data/forum.db");
        assert_eq!(config.filter.excluded, None);
        let filter = config.category_filter();
        assert_eq!(filter.column(), "forumid");
        assert_eq!(filter.excluded(), None);
        assert_eq!(config.search_log.path, PathBuf::from("/tmp/x.log"));
    }

    #[test]
    fn test_bad_excluded_category_override() {
        let mut config = SearchConfig::default();
        let err = config
            .apply_overrides_from(|key| (key == ENV_EXCLUDED_CATEGORY).then(|| "five".to_string()))
            .unwrap_err();
        assert!(matches!(err, SearchError::Config { .. }));
    }

    #[test]
    fn test_empty_dsn_rejected() {
        let err = SearchConfig::from_toml_str("[store]\ndsn = \"\"").unwrap_err();
        assert!(matches!(err, SearchError::Config { .. }));
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = SearchConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, SearchError::Config { .. }));
    }
}
