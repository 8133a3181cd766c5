//! Error types for permission access
//!
//! Resolution itself never fails. Errors come from loading configuration and
//! from querying through an access context that was never initialized.

use thiserror::Error;

/// Access error types.
#[derive(Debug, Error)]
pub enum AccessError {
    /// A permission query was made through a context with no access installed
    #[error("Permission query made outside of an initialized access context")]
    ContextMissing,

    /// Missing required environment variable
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Configuration file could not be read
    #[error("Failed to read configuration from {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration document is not valid
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for access operations.
pub type AccessResult<T> = Result<T, AccessError>;

impl AccessError {
    /// Check if this error is a wiring mistake rather than bad input.
    ///
    /// A missing context means the caller forgot to install access before
    /// querying it; configuration errors point at the deployed documents.
    pub fn is_programming_error(&self) -> bool {
        matches!(self, AccessError::ContextMissing)
    }

    /// Get error code for diagnostics.
    pub fn error_code(&self) -> &'static str {
        match self {
            AccessError::ContextMissing => "CONTEXT_MISSING",
            AccessError::MissingEnvVar(_) => "MISSING_ENV_VAR",
            AccessError::Io { .. } => "CONFIG_IO",
            AccessError::Json(_) => "CONFIG_INVALID",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AccessError::ContextMissing.error_code(), "CONTEXT_MISSING");
        assert_eq!(
            AccessError::MissingEnvVar("PERMITTED_CONFIG".to_string()).error_code(),
            "MISSING_ENV_VAR"
        );
    }

    #[test]
    fn test_programming_error() {
        assert!(AccessError::ContextMissing.is_programming_error());
        assert!(!AccessError::MissingEnvVar("X".to_string()).is_programming_error());
    }

    #[test]
    fn test_json_error_converts() {
        let err: AccessError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.error_code(), "CONFIG_INVALID");
        assert!(err.to_string().starts_with("Invalid configuration"));
    }
}
