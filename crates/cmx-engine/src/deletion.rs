//! # Register Deletion Guard
//!
//! A register entry may not be deleted while a matrix document assesses it,
//! nor while its status is `active` or `archived`. The guard collects every
//! applicable reason, not just the first, so the caller can report them
//! together. When no reason applies, deletion proceeds without further
//! checks and without cascading into other data.

use serde::{Deserialize, Serialize};

use cmx_core::{MatrixDocument, RegisterEntry, RegisterStatus};

/// Why a register entry cannot be deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionBlocker {
    /// A matrix document references the entry.
    ReferencedByMatrix,
    /// The entry's status is `active`.
    StatusActive,
    /// The entry's status is `archived`.
    StatusArchived,
}

impl DeletionBlocker {
    /// Human-readable reason, as shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Self::ReferencedByMatrix => "Dokument wird in der Compliance-Matrix verwendet",
            Self::StatusActive => "Dokumentenstatus ist \"active\"",
            Self::StatusArchived => "Dokumentenstatus ist \"archived\"",
        }
    }
}

impl std::fmt::Display for DeletionBlocker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of the deletion guard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionCheck {
    pub reasons: Vec<DeletionBlocker>,
}

impl DeletionCheck {
    /// Whether deletion may proceed.
    pub fn is_allowed(&self) -> bool {
        self.reasons.is_empty()
    }

    /// Whether a specific reason applies.
    pub fn contains(&self, reason: DeletionBlocker) -> bool {
        self.reasons.contains(&reason)
    }

    /// Reason messages, one per blocker.
    pub fn messages(&self) -> Vec<&'static str> {
        self.reasons.iter().map(DeletionBlocker::message).collect()
    }
}

/// Evaluate the guard for `entry` against all matrix documents.
pub fn check_register_deletion(
    entry: &RegisterEntry,
    documents: &[MatrixDocument],
) -> DeletionCheck {
    let mut reasons = Vec::new();

    if documents.iter().any(|d| d.register_id == entry.id) {
        reasons.push(DeletionBlocker::ReferencedByMatrix);
    }
    match entry.status {
        Some(RegisterStatus::Active) => reasons.push(DeletionBlocker::StatusActive),
        Some(RegisterStatus::Archived) => reasons.push(DeletionBlocker::StatusArchived),
        Some(RegisterStatus::Open) | Some(RegisterStatus::Obsolete) | None => {}
    }

    DeletionCheck { reasons }
}
