//! # Evidence Rule
//!
//! A clause assessed as `compliant` must be backed by evidence: a note, a
//! comment, a filled-in manual/process/form reference, or an attached file.
//! A compliant clause without any of these is *evidence-deficient*. That is
//! a warning surfaced to the caller; it never blocks a save.
//!
//! Attachments are not part of the clause record. Their counts come from an
//! [`AttachmentCounts`] collaborator, joined by clause id.

use std::collections::HashMap;

use cmx_core::{is_blank, ClauseId, ComplianceStatus, MatrixClause, MatrixDocument};

/// Supplies the number of files attached to a clause.
pub trait AttachmentCounts {
    /// Attachment count for the clause, 0 if unknown.
    fn attachment_count(&self, clause: &ClauseId) -> usize;
}

/// Attachment collaborator for contexts without file storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAttachments;

impl AttachmentCounts for NoAttachments {
    fn attachment_count(&self, _clause: &ClauseId) -> usize {
        0
    }
}

impl AttachmentCounts for HashMap<ClauseId, usize> {
    fn attachment_count(&self, clause: &ClauseId) -> usize {
        self.get(clause).copied().unwrap_or(0)
    }
}

fn filled(s: &str) -> bool {
    !is_blank(Some(s))
}

/// Whether the clause carries any evidence.
pub fn has_evidence(clause: &MatrixClause, attachment_count: usize) -> bool {
    filled(&clause.evidence_note)
        || filled(&clause.comment)
        || clause
            .internal_manual_refs
            .iter()
            .any(|r| filled(&r.exposition) || filled(&r.chapter) || filled(&r.description))
        || clause
            .process_refs
            .iter()
            .any(|r| filled(&r.number) || filled(&r.title))
        || clause
            .form_refs
            .iter()
            .any(|r| filled(&r.number) || filled(&r.title))
        || attachment_count > 0
}

/// Whether the clause's status requires evidence.
pub fn needs_evidence(clause: &MatrixClause) -> bool {
    match clause.compliance_status {
        ComplianceStatus::Compliant => true,
        ComplianceStatus::Open
        | ComplianceStatus::NotFulfilled
        | ComplianceStatus::NotApplicable => false,
    }
}

/// Whether the clause needs evidence and has none.
pub fn is_evidence_deficient(clause: &MatrixClause, attachment_count: usize) -> bool {
    needs_evidence(clause) && !has_evidence(clause, attachment_count)
}

/// Ids of the document's evidence-deficient clauses, in storage order.
pub fn deficient_clauses(
    doc: &MatrixDocument,
    attachments: &impl AttachmentCounts,
) -> Vec<ClauseId> {
    doc.clauses
        .iter()
        .filter(|c| is_evidence_deficient(c, attachments.attachment_count(&c.id)))
        .map(|c| c.id.clone())
        .collect()
}
