//! Error types for the planner library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Task not found for the given ID
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Quick-Add text that could not be turned into a task
    #[error("Couldn't parse a task from '{input}': {reason}")]
    Unparseable { input: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Date or time arithmetic errors
    #[error("Date/time error: {source}")]
    DateTime {
        #[from]
        source: jiff::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlannerError {
        PlannerError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a failed `spawn_blocking` join into a configuration error.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlannerError::database(message).with_source(e))
    }
}

/// Extension trait for file system Results that carry the offending path.
pub trait FileSystemResultExt<T> {
    /// Map I/O errors to [`PlannerError::FileSystem`] for `path`.
    fn fs_context(self, path: &std::path::Path) -> Result<T>;
}

impl<T> FileSystemResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|source| PlannerError::FileSystem {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_builder() {
        let error = PlannerError::invalid_input("status").with_reason("unknown status 'later'");
        assert_eq!(
            error.to_string(),
            "Invalid input for field 'status': unknown status 'later'"
        );
    }

    #[test]
    fn test_unparseable_message_is_user_facing() {
        let error = PlannerError::Unparseable {
            input: "   ".to_string(),
            reason: "input is empty".to_string(),
        };
        assert!(error.to_string().starts_with("Couldn't parse a task"));
    }

    #[test]
    fn test_fs_context_keeps_path() {
        let path = std::path::Path::new("/nonexistent/state.json");
        let result: Result<String> = std::fs::read_to_string(path).fs_context(path);
        match result {
            Err(PlannerError::FileSystem { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected FileSystem error, got {other:?}"),
        }
    }
}
