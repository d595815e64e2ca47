use thiserror::Error;

/// Result type alias using SearchError
pub type Result<T> = std::result::Result<T, SearchError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable by transport layers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    MissingField,
    InvalidType,
    UnexpectedField,

    // Planning
    UnrecognizedRequest,

    // Store access
    Connection,
    Execution,

    // Search log
    NotWritable,
    Io,

    Config,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::InvalidType => "ERR_INVALID_TYPE",
            ExErrorKind::UnexpectedField => "ERR_UNEXPECTED_FIELD",
            ExErrorKind::UnrecognizedRequest => "ERR_UNRECOGNIZED_REQUEST",
            ExErrorKind::Connection => "ERR_CONNECTION",
            ExErrorKind::Execution => "ERR_EXECUTION",
            ExErrorKind::NotWritable => "ERR_NOT_WRITABLE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the kind halts a request before any query is issued
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            ExErrorKind::MissingField
                | ExErrorKind::InvalidType
                | ExErrorKind::UnexpectedField
                | ExErrorKind::UnrecognizedRequest
        )
    }
}

/// Canonical structured error type
///
/// Classification plus context, used by the logging macros and by callers
/// that need a stable code rather than a message.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    field: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            field: None,
            path: None,
            message: String::new(),
        }
    }

    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add request field context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add filesystem path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for the search pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    // ===== Validation =====
    /// A `required` field is absent or empty after sanitization
    #[error("missing field: {field}")]
    MissingField { field: String },

    /// A `string` field carries a nested structure
    #[error("field {field} must be a string")]
    InvalidType { field: String },

    /// A field not covered by the rule table, under `UnknownFields::Reject`
    #[error("unexpected field: {field}")]
    UnexpectedField { field: String },

    // ===== Planning =====
    /// Neither `searchid` nor `q` carries a value
    #[error("unrecognized request: expected a non-empty searchid or q")]
    UnrecognizedRequest,

    // ===== Store =====
    #[error("no connection: {message}")]
    Connection { message: String },

    #[error("query failed: {message}")]
    Execution { message: String },

    // ===== Search log =====
    #[error("file {path} is not writable")]
    NotWritable { path: String },

    #[error("search log I/O error: {message}")]
    Io { message: String },

    // ===== Generic =====
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl SearchError {
    /// Message safe to show to the requester
    ///
    /// Store errors carry driver text (table names, file paths); unless
    /// `expose_details` is set they collapse to a generic message.
    pub fn public_message(&self, expose_details: bool) -> String {
        match self {
            SearchError::Connection { .. } if !expose_details => {
                "search is temporarily unavailable".to_string()
            }
            SearchError::Execution { .. } if !expose_details => {
                "search could not be completed".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<SearchError> for ExError {
    fn from(err: SearchError) -> Self {
        let message = err.to_string();
        match err {
            SearchError::MissingField { field } => ExError::new(ExErrorKind::MissingField)
                .with_op("validate")
                .with_field(field)
                .with_message(message),

            SearchError::InvalidType { field } => ExError::new(ExErrorKind::InvalidType)
                .with_op("validate")
                .with_field(field)
                .with_message(message),

            SearchError::UnexpectedField { field } => ExError::new(ExErrorKind::UnexpectedField)
                .with_op("validate")
                .with_field(field)
                .with_message(message),

            SearchError::UnrecognizedRequest => ExError::new(ExErrorKind::UnrecognizedRequest)
                .with_op("plan")
                .with_message(message),

            SearchError::Connection { .. } => ExError::new(ExErrorKind::Connection)
                .with_op("ensure_connection")
                .with_message(message),

            SearchError::Execution { .. } => ExError::new(ExErrorKind::Execution)
                .with_op("execute")
                .with_message(message),

            SearchError::NotWritable { path } => ExError::new(ExErrorKind::NotWritable)
                .with_op("log_search")
                .with_path(path)
                .with_message(message),

            SearchError::Io { .. } => ExError::new(ExErrorKind::Io)
                .with_op("log_search")
                .with_message(message),

            SearchError::Config { .. } => ExError::new(ExErrorKind::Config)
                .with_op("load_config")
                .with_message(message),
        }
    }
}

impl From<&SearchError> for ExError {
    fn from(err: &SearchError) -> Self {
        err.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_op_and_field() {
        let ex: ExError = SearchError::MissingField {
            field: "searchid".to_string(),
        }
        .into();
        let rendered = ex.to_string();
        assert!(rendered.starts_with("[ERR_MISSING_FIELD] in operation 'validate'"));
        assert!(rendered.contains("(field: searchid)"));
    }

    #[test]
    fn test_request_error_classification() {
        assert!(ExErrorKind::MissingField.is_request_error());
        assert!(ExErrorKind::UnrecognizedRequest.is_request_error());
        assert!(!ExErrorKind::Execution.is_request_error());
        assert!(!ExErrorKind::NotWritable.is_request_error());
    }
}
