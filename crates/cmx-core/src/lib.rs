//! # cmx-core — Record Model for the Compliance Matrix
//!
//! This crate is the leaf of the `cmx` workspace. It defines the records the
//! assessment engine, the history diff engine and the store operate on:
//!
//! - **Register** (`register.rs`): `RegisterEntry`, the regulatory document
//!   entered into the register, with its append-only audit `history`, plus
//!   `RegisterPatch`, the partial update applied by saves.
//!
//! - **Matrix** (`matrix.rs`): `MatrixDocument`, the compliance assessment of
//!   one register entry, and its `MatrixClause` rows.
//!
//! - **Identity** (`identity.rs`): opaque string identifiers, one newtype per
//!   record kind.
//!
//! - **Temporal** (`temporal.rs`): UTC `Timestamp` for provenance and audit
//!   entries, and lenient calendar-date parsing for the ISO date fields.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cmx-*` crates.
//! - No behavior beyond constructors, accessors and invariant-preserving
//!   helpers. Metrics live in `cmx-engine`, diffing in `cmx-audit`.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public records derive `Debug`, `Clone`, `Serialize`, `Deserialize`.

pub mod error;
pub mod identity;
pub mod matrix;
pub mod register;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::CmxError;
pub use identity::{ClauseId, MatrixDocumentId, ReferenceId, RegisterId};
pub use matrix::{
    ClauseReference, ComplianceStatus, FormRef, ManualRef, MatrixClause, MatrixDocument,
    MatrixStatus, MaturityLevel, ProcessRef, RiskAggregationMode, RiskScope, CLAUSE_DEPTH,
};
pub use register::{
    AuditEntry, ContractContext, DocumentType, RegisterEntry, RegisterPatch, RegisterStatus,
};
pub use temporal::{parse_calendar_date, Timestamp};

/// Whether an optional free-text value is absent for comparison purposes.
///
/// `None`, the empty string and whitespace-only strings all count as absent.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}
