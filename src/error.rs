use thiserror::Error;

/// Convenience result type used across loading, analysis and the HTTP layer.
pub type InsightResult<T> = Result<T, InsightError>;

/// Coarse classification of an [`InsightError`].
///
/// The HTTP layer maps these onto status codes; observers use them to pick a log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorKind {
    /// The uploaded bytes are not a well-formed table.
    Parse,
    /// The upload itself was rejected (content type, size).
    Validation,
    /// No dataset is stored under the requested identifier.
    NotFound,
    /// Anything else; surfaces as a server error.
    Internal,
}

/// Error type shared by the table loader, the analysis rules and the HTTP layer.
#[derive(Debug, Error)]
pub enum InsightError {
    /// Malformed delimited text (ragged rows, invalid UTF-8, ...).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input could be read but does not describe a table (e.g. no header row).
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Columns handed to [`crate::types::Table::new`] violate the table invariants.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// An upload was rejected before parsing.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Unknown dataset identifier.
    #[error("dataset '{dataset_id}' not found")]
    NotFound { dataset_id: String },

    /// A statistic is undefined for the values at hand.
    #[error("cannot compute statistics for column '{column}': {message}")]
    Statistics { column: String, message: String },

    /// Analysis was requested for a table without rows.
    #[error("table has no rows")]
    EmptyTable,

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl InsightError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn statistics(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Statistics {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Classify this error for status mapping and alerting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            InsightError::Csv(err) => match err.kind() {
                ::csv::ErrorKind::Io(_) => ErrorKind::Internal,
                _ => ErrorKind::Parse,
            },
            InsightError::Parse { .. } | InsightError::SchemaMismatch { .. } => ErrorKind::Parse,
            InsightError::Validation { .. } => ErrorKind::Validation,
            InsightError::NotFound { .. } => ErrorKind::NotFound,
            InsightError::Statistics { .. }
            | InsightError::EmptyTable
            | InsightError::Internal { .. } => ErrorKind::Internal,
        }
    }
}
