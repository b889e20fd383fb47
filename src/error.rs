//! Application-wide error types.
//!
//! This module defines the top of the error hierarchy. Each layer keeps its
//! own `thiserror` enum and converts into `AppError` at the application edge.

pub use crate::config::ConfigError;
pub use crate::state::NavError;
pub use crate::workspace::StoreError;

/// Main application error type.
///
/// This is the top-level error type that encompasses all error types
/// in the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Workspace errors
    #[error("Workspace error: {0}")]
    Store(#[from] StoreError),

    /// Navigation errors
    #[error("Navigation error: {0}")]
    Nav(#[from] NavError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Logger initialization errors
    #[error("Logger error: {0}")]
    Logger(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let app_error: AppError = ConfigError::FilePathNotSet.into();
        assert!(matches!(app_error, AppError::Config(_)));
        assert!(app_error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_app_error_from_store_error() {
        let store_error = StoreError::NotFound {
            path: "a.pn".to_string(),
        };
        let app_error: AppError = store_error.into();
        assert!(matches!(app_error, AppError::Store(_)));
        assert!(app_error.to_string().contains("Workspace error"));
    }

    #[test]
    fn test_app_error_from_nav_error() {
        let app_error: AppError = NavError::NoNoteOpen.into();
        assert!(matches!(app_error, AppError::Nav(_)));
        assert!(app_error.to_string().contains("No note is open"));
    }

    #[test]
    fn test_app_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let app_error: AppError = io_error.into();
        assert!(matches!(app_error, AppError::Io(_)));
        assert!(app_error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_app_error_terminal_and_other() {
        let error = AppError::Terminal("no tty".to_string());
        assert!(error.to_string().contains("Terminal error"));
        let error = AppError::Other("Generic error".to_string());
        assert_eq!(error.to_string(), "Generic error");
    }
}
