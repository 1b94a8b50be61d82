//! # Document Assessment
//!
//! One call that computes everything an export or print consumer shows for a
//! matrix document: the compliance partition, maturity and risk roll-ups,
//! and the clause list in display order with per-clause evidence flags.
//! Consumers format this; they do not recompute any of it.

use serde::{Deserialize, Serialize};

use cmx_core::{
    ClauseId, ComplianceStatus, MatrixDocument, MatrixDocumentId, MatrixStatus, MaturityLevel,
    RegisterId,
};

use crate::compliance::{clause_compliance_stats, ClauseComplianceStats};
use crate::evidence::{has_evidence, needs_evidence, AttachmentCounts};
use crate::maturity::{maturity_summary, MaturitySummary};
use crate::ordering::{reference_string, sort_clauses};
use crate::risk::{risk_score, risk_summary, RiskSummary};

/// Per-clause row of an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClauseAssessment {
    pub clause_id: ClauseId,
    /// Joined reference labels; empty if the clause has none.
    pub reference: String,
    pub requirement_text: String,
    pub compliance_status: ComplianceStatus,
    pub maturity_level: Option<MaturityLevel>,
    pub risk_score: Option<u8>,
    pub attachment_count: usize,
    pub has_evidence: bool,
    pub evidence_deficient: bool,
}

/// Derived compliance state of one matrix document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAssessment {
    pub document_id: MatrixDocumentId,
    pub register_id: RegisterId,
    pub status: MatrixStatus,
    pub compliance: ClauseComplianceStats,
    pub maturity: MaturitySummary,
    pub risk: RiskSummary,
    /// Clauses in display order.
    pub clauses: Vec<ClauseAssessment>,
    /// Number of evidence-deficient clauses.
    pub deficient_count: usize,
}

/// Assess a matrix document.
pub fn assess_document(
    doc: &MatrixDocument,
    attachments: &impl AttachmentCounts,
) -> DocumentAssessment {
    let clauses: Vec<ClauseAssessment> = sort_clauses(&doc.clauses)
        .into_iter()
        .map(|clause| {
            let attachment_count = attachments.attachment_count(&clause.id);
            let evidence = has_evidence(clause, attachment_count);
            ClauseAssessment {
                clause_id: clause.id.clone(),
                reference: reference_string(clause),
                requirement_text: clause.requirement_text.clone(),
                compliance_status: clause.compliance_status,
                maturity_level: clause.maturity_level,
                risk_score: risk_score(clause),
                attachment_count,
                has_evidence: evidence,
                evidence_deficient: needs_evidence(clause) && !evidence,
            }
        })
        .collect();

    let deficient_count = clauses.iter().filter(|c| c.evidence_deficient).count();
    let assessment = DocumentAssessment {
        document_id: doc.id.clone(),
        register_id: doc.register_id.clone(),
        status: doc.status,
        compliance: clause_compliance_stats(&doc.clauses),
        maturity: maturity_summary(&doc.clauses),
        risk: risk_summary(&doc.clauses, doc.risk_aggregation_mode, doc.risk_scope),
        clauses,
        deficient_count,
    };

    tracing::debug!(
        document = %doc.id,
        clauses = assessment.compliance.total,
        fulfillment_pct = assessment.compliance.fulfillment_pct,
        deficient = deficient_count,
        "assessed matrix document"
    );
    assessment
}
