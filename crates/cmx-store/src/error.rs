//! # Store Errors
//!
//! Unknown ids and the refused deletion are domain outcomes the caller is
//! expected to handle. Persistence failures carry the file they concern.

use std::path::PathBuf;

use thiserror::Error;

use cmx_core::{ClauseId, MatrixDocumentId, RegisterId};
use cmx_engine::DeletionBlocker;

/// Failure of a persistence collaborator.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Reading or writing a data file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data file did not contain the expected JSON collection.
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by [`crate::ComplianceStore`] operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unknown register entry {0}")]
    UnknownRegisterEntry(RegisterId),

    #[error("unknown matrix document {0}")]
    UnknownMatrixDocument(MatrixDocumentId),

    #[error("no matrix document assesses register entry {0}")]
    NoMatrixForEntry(RegisterId),

    #[error("unknown clause {clause} in matrix document {document}")]
    UnknownClause {
        document: MatrixDocumentId,
        clause: ClauseId,
    },

    /// A register entry with this id already exists.
    #[error("register entry {0} already exists")]
    DuplicateRegisterEntry(RegisterId),

    /// None of type, code, title or topic is filled in.
    #[error("register entry {0} is empty: set at least one of type, code, title or topic")]
    EmptyEntry(RegisterId),

    /// The deletion guard refused. All applicable reasons are listed.
    #[error("register entry {id} cannot be deleted: {}", join_reasons(.reasons))]
    DeletionBlocked {
        id: RegisterId,
        reasons: Vec<DeletionBlocker>,
    },

    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

fn join_reasons(reasons: &[DeletionBlocker]) -> String {
    reasons
        .iter()
        .map(DeletionBlocker::message)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deletion_blocked_lists_every_reason() {
        let err = StoreError::DeletionBlocked {
            id: RegisterId::from("r1"),
            reasons: vec![DeletionBlocker::ReferencedByMatrix, DeletionBlocker::StatusActive],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("register entry register:r1 cannot be deleted: "));
        assert!(msg.contains("Compliance-Matrix"));
        assert!(msg.contains("\"active\""));
    }

    #[test]
    fn test_persistence_error_names_file() {
        let err = PersistenceError::Io {
            path: PathBuf::from("/data/register.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/data/register.json"));
    }
}
