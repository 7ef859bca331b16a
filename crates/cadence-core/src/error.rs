//! Error types for the cadence library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all agenda operations.
#[derive(Error, Debug)]
pub enum CadenceError {
    /// Task not found for the given ID
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: u64 },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// Operation is not allowed in the plan's current state
    #[error("Cannot {action} plan {id}: plan is {state}")]
    InvalidState {
        id: u64,
        state: String,
        action: String,
    },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Persistence failures without a more specific source
    #[error("Persistence error: {message}")]
    Persistence { message: String },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
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
    pub fn with_source(self, source: rusqlite::Error) -> CadenceError {
        CadenceError::Database {
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
    pub fn with_reason(self, reason: impl Into<String>) -> CadenceError {
        CadenceError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl CadenceError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates an invalid state error for a plan.
    pub fn invalid_state(id: u64, state: impl ToString, action: impl Into<String>) -> Self {
        Self::InvalidState {
            id,
            state: state.to_string(),
            action: action.into(),
        }
    }

    /// Returns true when the error came from the persistence layer.
    ///
    /// The in-memory store is never rolled back after such an error, so
    /// callers can keep working with the state they already observed.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Database { .. }
                | Self::FileSystem { .. }
                | Self::Serialization { .. }
                | Self::Persistence { .. }
        )
    }

    /// Returns true for missing task or plan errors.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TaskNotFound { .. } | Self::PlanNotFound { .. })
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| CadenceError::database(message).with_source(e))
    }
}

/// Extension trait for attaching a path to I/O failures.
pub trait IoResultExt<T> {
    /// Map I/O errors to a file system error at `path`.
    fn fs_context(self, path: &std::path::Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|source| CadenceError::FileSystem {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Result type alias for cadence operations
pub type Result<T> = std::result::Result<T, CadenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let missing = CadenceError::PlanNotFound { id: 3 };
        assert!(missing.is_not_found());
        assert!(!missing.is_persistence());

        let io = CadenceError::FileSystem {
            path: PathBuf::from("/tmp/x"),
            source: std::io::Error::other("boom"),
        };
        assert!(io.is_persistence());

        let state = CadenceError::invalid_state(4, "ended", "pause");
        assert_eq!(state.to_string(), "Cannot pause plan 4: plan is ended");
    }

    #[test]
    fn test_invalid_input_builder() {
        let err = CadenceError::invalid_input("title").with_reason("must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'title': must not be empty"
        );
    }
}
