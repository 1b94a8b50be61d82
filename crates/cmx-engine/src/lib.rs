//! # cmx-engine — Compliance Assessment Engine
//!
//! Pure functions that turn raw register and matrix records into derived
//! compliance state:
//!
//! - **Register metrics** (`register_metrics.rs`): status counts and deadline
//!   buckets over the register.
//!
//! - **Compliance** (`compliance.rs`): per-document clause status counts and
//!   fulfillment percentage.
//!
//! - **Maturity** (`maturity.rs`): PSOE average and nearest-level mapping.
//!
//! - **Risk** (`risk.rs`): severity × probability scoring and worst-case /
//!   index aggregation.
//!
//! - **Ordering** (`ordering.rs`): clause display order by reference string
//!   under German collation.
//!
//! - **Evidence** (`evidence.rs`): whether a clause has, and needs, evidence.
//!
//! - **Deletion** (`deletion.rs`): the guard consulted before a register entry
//!   is removed.
//!
//! - **Assessment** (`assessment.rs`): everything above bundled per document
//!   for export consumers.
//!
//! ## Failure Semantics
//!
//! Every function here is total. Absent or malformed optional inputs (an
//! unparseable due date, a severity of 7) are excluded from aggregates
//! rather than reported as errors. The deletion guard's refusal is a value,
//! not an error.
//!
//! ## Crate Policy
//!
//! - Depends only on `cmx-core` internally.
//! - No mutation of inputs; callers hand in slices and receive fresh results.
//! - Status enums are matched exhaustively.

pub mod assessment;
pub mod compliance;
pub mod deletion;
pub mod evidence;
pub mod maturity;
pub mod ordering;
pub mod register_metrics;
pub mod risk;

pub use assessment::{assess_document, ClauseAssessment, DocumentAssessment};
pub use compliance::{clause_compliance_stats, ClauseComplianceStats};
pub use deletion::{check_register_deletion, DeletionBlocker, DeletionCheck};
pub use evidence::{
    deficient_clauses, has_evidence, is_evidence_deficient, needs_evidence, AttachmentCounts,
    NoAttachments,
};
pub use maturity::{maturity_summary, nearest_level, MaturitySummary};
pub use ordering::{compare_german, reference_string, sort_clauses};
pub use register_metrics::{
    deadline_stats, status_counts, DeadlineStats, StatusCounts, DEFAULT_DUE_SOON_DAYS,
};
pub use risk::{risk_score, risk_summary, RiskSummary};
