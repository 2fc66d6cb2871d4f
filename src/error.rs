use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "options.messages[0].role", "config.base_url")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected range, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "options_validator", "client_builder")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// The stage of a chat completion call that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Configuration,
    Validation,
    Serialization,
    Transport,
    Deserialization,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Configuration => "configuration",
            Stage::Validation => "validation",
            Stage::Serialization => "serialization",
            Stage::Transport => "transport",
            Stage::Deserialization => "deserialization",
        }
    }
}

/// Unified error type for the chat completion client.
///
/// Each variant maps to exactly one stage of the call, so callers can tell
/// from the error alone whether the request ever reached the network.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    /// Pre-flight failure. Never reaches the network.
    #[error("Validation error: invalid or missing field(s): {}{}", .fields.join(", "), format_context(.context))]
    Validation {
        fields: Vec<String>,
        context: ErrorContext,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response body did not match the expected shape. `body` holds a
    /// truncated excerpt of what the server sent.
    #[error("Deserialization error: {source} (body: {body})")]
    Deserialization {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a validation error for the given offending fields.
    pub fn validation(fields: Vec<String>) -> Self {
        Error::Validation {
            fields,
            context: ErrorContext::new().with_source("options_validator"),
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Validation { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    /// The stage of the call that failed.
    pub fn stage(&self) -> Stage {
        match self {
            Error::Configuration { .. } => Stage::Configuration,
            Error::Validation { .. } => Stage::Validation,
            Error::Serialization(_) => Stage::Serialization,
            Error::Transport(_) => Stage::Transport,
            Error::Deserialization { .. } => Stage::Deserialization,
        }
    }

    /// Offending field names for validation errors.
    pub fn invalid_fields(&self) -> Option<&[String]> {
        match self {
            Error::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Whether a caller-side retry policy may reasonably try again.
    ///
    /// Only transport failures can be transient; the client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(e) => e.is_retryable(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_fields() {
        let err = Error::validation(vec!["model".into(), "messages".into()]);
        let msg = err.to_string();
        assert!(msg.contains("model, messages"), "{msg}");
        assert!(msg.contains("source: options_validator"), "{msg}");
        assert_eq!(err.stage(), Stage::Validation);
        assert_eq!(
            err.invalid_fields(),
            Some(&["model".to_string(), "messages".to_string()][..])
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_configuration_error_context() {
        let err = Error::configuration_with_context(
            "invalid base url",
            ErrorContext::new()
                .with_field_path("config.base_url")
                .with_details("relative URL without a base"),
        );
        assert_eq!(err.stage(), Stage::Configuration);
        let ctx = err.context().expect("context");
        assert_eq!(ctx.field_path.as_deref(), Some("config.base_url"));
        assert_eq!(
            err.to_string(),
            "Configuration error: invalid base url (field: config.base_url, details: relative URL without a base)"
        );
    }

    #[test]
    fn test_transport_errors_convert() {
        let err: Error = TransportError::Cancelled.into();
        assert_eq!(err.stage(), Stage::Transport);
        assert!(err.context().is_none());
        assert!(!err.is_retryable());

        let err: Error = TransportError::Status {
            status: 503,
            message: "overloaded".into(),
            error_type: None,
            code: None,
        }
        .into();
        assert!(err.is_retryable());
        assert_eq!(err.stage().as_str(), "transport");
    }
}
