//! Error types for action registration and construction.
//!
//! Construction errors are recoverable: the caller (normally the bindings
//! loader) drops the one misconfigured action and keeps going. Registration
//! errors indicate a defect in a built-in kind and abort startup.

use thiserror::Error;

/// An action kind rejected its configuration mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required option is absent.
    #[error("missing option: {key}")]
    Missing { key: String },

    /// An option is present but has the wrong type.
    #[error("option {key} must be {expected}, found {found}")]
    WrongType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// An option has the right type but an unusable value.
    #[error("invalid option {key}: {reason}")]
    Invalid { key: String, reason: String },
}

impl ConfigError {
    /// Shorthand for [`ConfigError::Invalid`].
    #[must_use]
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Failure to build an action instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// No kind is registered under this name.
    #[error("unknown action kind: {0}")]
    UnknownActionKind(String),

    /// The kind's setup rejected the configuration.
    #[error("invalid configuration for action {kind}: {source}")]
    InvalidConfig {
        kind: String,
        #[source]
        source: ConfigError,
    },
}

/// Failure to change the registry table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A kind with this name already exists.
    #[error("action kind already registered: {0}")]
    DuplicateName(String),

    /// No kind with this name exists.
    #[error("action kind not registered: {0}")]
    UnknownName(String),
}

/// Result type for action construction.
pub type Result<T> = std::result::Result<T, ActionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = ActionError::UnknownActionKind("Frobnicate".to_string());
        assert_eq!(err.to_string(), "unknown action kind: Frobnicate");

        let err = RegistryError::DuplicateName("Move".to_string());
        assert_eq!(err.to_string(), "action kind already registered: Move");

        let err = ConfigError::WrongType {
            key: "edge".to_string(),
            expected: "a string",
            found: "an integer",
        };
        assert_eq!(
            err.to_string(),
            "option edge must be a string, found an integer"
        );
    }

    #[test]
    fn invalid_config_exposes_source() {
        let err = ActionError::InvalidConfig {
            kind: "Resize".to_string(),
            source: ConfigError::invalid("edge", "expected one of top, bottom, left, right"),
        };
        assert!(err.to_string().starts_with("invalid configuration for action Resize"));
        let source = err.source().expect("config error is the source");
        assert!(source.to_string().contains("invalid option edge"));
    }
}
