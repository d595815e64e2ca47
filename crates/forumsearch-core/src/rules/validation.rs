use crate::errors::{Result, SearchError};
use crate::model::{FieldValue, RequestFields};
use serde::{Deserialize, Serialize};

use super::sanitize::sanitize_text;

/// A single constraint tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// Field must be present and non-empty after sanitization
    Required,
    /// Field, when present, must be text rather than a nested structure
    String,
}

/// Ordered, duplicate-free set of constraints for one field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationRule {
    constraints: Vec<Constraint>,
}

impl ValidationRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_constraints(constraints: impl IntoIterator<Item = Constraint>) -> Self {
        constraints
            .into_iter()
            .fold(Self::new(), |rule, c| rule.with(c))
    }

    pub fn with(mut self, constraint: Constraint) -> Self {
        if !self.constraints.contains(&constraint) {
            self.constraints.push(constraint);
        }
        self
    }

    pub fn required(self) -> Self {
        self.with(Constraint::Required)
    }

    pub fn string(self) -> Self {
        self.with(Constraint::String)
    }

    pub fn is_required(&self) -> bool {
        self.constraints.contains(&Constraint::Required)
    }

    pub fn expects_string(&self) -> bool {
        self.constraints.contains(&Constraint::String)
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}

/// What to do with request fields the rule table does not mention
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFields {
    /// Keep them, unsanitized
    #[default]
    PassThrough,
    /// Fail with `UnexpectedField`
    Reject,
}

/// The field rule table
///
/// Field order is significant: fields are checked in table order and the
/// first failure is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRules {
    rules: Vec<(String, ValidationRule)>,
    unknown_fields: UnknownFields,
}

impl ValidationRules {
    /// An empty table: every field passes through
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            unknown_fields: UnknownFields::PassThrough,
        }
    }

    /// Add or replace the rule for `field`
    ///
    /// Replacing keeps the field's original position.
    pub fn with_rule(mut self, field: impl Into<String>, rule: ValidationRule) -> Self {
        let field = field.into();
        match self.rules.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = rule,
            None => self.rules.push((field, rule)),
        }
        self
    }

    pub fn with_unknown_fields(mut self, policy: UnknownFields) -> Self {
        self.unknown_fields = policy;
        self
    }

    pub fn get(&self, field: &str) -> Option<&ValidationRule> {
        self.rules
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rule)| rule)
    }

    pub fn covers(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationRule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn unknown_fields(&self) -> UnknownFields {
        self.unknown_fields
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for ValidationRules {
    /// `searchid`, `do` and `query`, each a required string
    fn default() -> Self {
        Self::new()
            .with_rule("searchid", ValidationRule::new().string().required())
            .with_rule("do", ValidationRule::new().string().required())
            .with_rule("query", ValidationRule::new().string().required())
    }
}

/// Validate and sanitize a request
///
/// Every rule-covered text field is trimmed and markup-escaped exactly once.
/// Fields outside the table are returned untouched under
/// `UnknownFields::PassThrough`.
///
/// # Errors
/// * `MissingField` - a `required` field is absent or empty after sanitization
/// * `InvalidType` - a `string` field holds a nested structure
/// * `UnexpectedField` - an uncovered field under `UnknownFields::Reject`
pub fn validate(mut fields: RequestFields, rules: &ValidationRules) -> Result<RequestFields> {
    for (name, rule) in rules.iter() {
        let sanitized = match fields.remove(name) {
            Some(FieldValue::Text(raw)) => Some(FieldValue::Text(sanitize_text(&raw))),
            other => other,
        };

        if rule.is_required() && sanitized.as_ref().map_or(true, FieldValue::is_empty) {
            return Err(SearchError::MissingField {
                field: name.to_string(),
            });
        }

        if rule.expects_string() && matches!(sanitized, Some(FieldValue::Structured(_))) {
            return Err(SearchError::InvalidType {
                field: name.to_string(),
            });
        }

        if let Some(value) = sanitized {
            fields.insert(name, value);
        }
    }

    if rules.unknown_fields() == UnknownFields::Reject {
        if let Some(extra) = fields.names().find(|name| !rules.covers(name)) {
            return Err(SearchError::UnexpectedField {
                field: extra.to_string(),
            });
        }
    }

    Ok(fields)
}
