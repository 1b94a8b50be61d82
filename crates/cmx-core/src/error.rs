//! # Error Types
//!
//! The record model is almost entirely infallible: optional inputs that do
//! not parse are excluded from aggregates instead of failing. What remains
//! are parse failures for the enum vocabularies and JSON (de)serialization
//! of whole records.

use thiserror::Error;

/// Top-level error type for the record model.
#[derive(Error, Debug)]
pub enum CmxError {
    /// A string did not name a known enum value.
    #[error("unknown {kind} value: {value:?}")]
    UnknownValue {
        /// The vocabulary that was being parsed (e.g. `"register status"`).
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A record failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CmxError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownValue {
            kind,
            value: value.to_string(),
        }
    }
}
