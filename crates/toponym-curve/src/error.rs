//! Error types for curve records and the class registry.

use thiserror::Error;

/// Errors that can occur while dumping, loading or building curves.
#[derive(Error, Debug)]
pub enum CurveError {
    /// No constructor is registered for the class tag (after alias resolution).
    #[error("unknown curve type: {0}")]
    UnknownCurveType(String),

    /// A record field is present but cannot be interpreted.
    #[error("malformed {class} record: field `{field}` {reason}")]
    MalformedRecord {
        /// Class tag of the record.
        class: String,
        /// Offending field name.
        field: String,
        /// What was wrong with it.
        reason: String,
    },

    /// JSON (de)serialization of a record failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CurveError {
    /// Create a malformed-record error.
    pub fn malformed(
        class: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            class: class.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;
