//! Error types for Mostly Harmless
//!
//! All modules use `HarmlessResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Mostly Harmless operations
pub type HarmlessResult<T> = Result<T, HarmlessError>;

/// All errors that can occur in Mostly Harmless
#[derive(Error, Debug)]
pub enum HarmlessError {
    // Remote API errors
    #[error("reddit returned an error (HTTP {status})")]
    Http { status: u16 },

    #[error("reddit did not respond within {secs} seconds")]
    Timeout { secs: u64 },

    #[error("You must be logged in to reddit to do that")]
    AuthRequired,

    #[error("Unexpected response from reddit: {0}")]
    Schema(String),

    #[error("Request failed: {0}")]
    Transport(String),

    // Cache errors
    #[error("No reddit data cached for {0}")]
    NotCached(String),

    #[error("Post {fullname} is not cached for {url}")]
    UnknownPost { url: String, fullname: String },

    #[error("Failed to persist store {name}: {reason}")]
    StorePersist { name: String, reason: String },

    // Input errors
    #[error("Cannot submit an empty comment")]
    EmptyInput,

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl HarmlessError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a schema validation error
    pub fn schema(reason: impl std::fmt::Display) -> Self {
        Self::Schema(reason.to_string())
    }

    /// Check if retrying the same user action may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::Timeout { .. } | Self::Transport(_)
        )
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::AuthRequired => Some("Log in to reddit, then run: mostly-harmless lookup <url>"),
            Self::NotCached(_) => Some("Run: mostly-harmless lookup <url>"),
            Self::Timeout { .. } => Some("Raise it with: mostly-harmless settings set timeoutLength <secs>"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = HarmlessError::Http { status: 503 };
        assert!(err.to_string().contains("HTTP 503"));

        let err = HarmlessError::Timeout { secs: 5 };
        assert!(err.to_string().contains("5 seconds"));
    }

    #[test]
    fn error_hint() {
        let err = HarmlessError::NotCached("https://example.com/".to_string());
        assert_eq!(err.hint(), Some("Run: mostly-harmless lookup <url>"));
        assert_eq!(HarmlessError::EmptyInput.hint(), None);
    }

    #[test]
    fn error_retryable() {
        assert!(HarmlessError::Timeout { secs: 5 }.is_retryable());
        assert!(HarmlessError::Http { status: 500 }.is_retryable());
        assert!(!HarmlessError::AuthRequired.is_retryable());
        assert!(!HarmlessError::EmptyInput.is_retryable());
    }
}
