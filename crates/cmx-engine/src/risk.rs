//! # Risk Aggregation
//!
//! A clause's risk score is `severity * probability`, each rated 1..=4, so
//! scores range over 1..=16. A clause with only one of the two ratings, or
//! with a rating outside 1..=4, has no score and is left out.
//!
//! The document value is the worst score in scope (`worst_case`) or the mean
//! (`index`). Scope is every scored clause, or only those not `compliant`.

use serde::{Deserialize, Serialize};

use cmx_core::{ComplianceStatus, MatrixClause, RiskAggregationMode, RiskScope};

const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=4;

/// Risk score of a clause, if both ratings are present and in range.
pub fn risk_score(clause: &MatrixClause) -> Option<u8> {
    let severity = clause.risk_severity.filter(|s| RATING_RANGE.contains(s))?;
    let probability = clause.risk_probability.filter(|p| RATING_RANGE.contains(p))?;
    Some(severity * probability)
}

/// Document-level risk roll-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    pub mode: RiskAggregationMode,
    pub scope: RiskScope,
    /// Scored clauses inside the scope.
    pub scored: usize,
    pub avg_score: Option<f64>,
    pub worst_score: Option<u8>,
    /// `worst_score` or `avg_score` depending on the mode; `None` when
    /// nothing is in scope.
    pub doc_value: Option<f64>,
}

/// Aggregate clause risk under the given mode and scope.
pub fn risk_summary(
    clauses: &[MatrixClause],
    mode: RiskAggregationMode,
    scope: RiskScope,
) -> RiskSummary {
    let scores: Vec<u8> = clauses
        .iter()
        .filter(|c| in_scope(c, scope))
        .filter_map(risk_score)
        .collect();

    let mut summary = RiskSummary {
        mode,
        scope,
        scored: scores.len(),
        ..RiskSummary::default()
    };
    if scores.is_empty() {
        return summary;
    }

    let sum: u32 = scores.iter().map(|s| u32::from(*s)).sum();
    let avg = f64::from(sum) / scores.len() as f64;
    let worst = scores.iter().copied().max();

    summary.avg_score = Some(avg);
    summary.worst_score = worst;
    summary.doc_value = match mode {
        RiskAggregationMode::WorstCase => worst.map(f64::from),
        RiskAggregationMode::Index => Some(avg),
    };
    summary
}

fn in_scope(clause: &MatrixClause, scope: RiskScope) -> bool {
    match scope {
        RiskScope::All => true,
        RiskScope::NonCompliant => match clause.compliance_status {
            ComplianceStatus::Compliant => false,
            ComplianceStatus::Open
            | ComplianceStatus::NotFulfilled
            | ComplianceStatus::NotApplicable => true,
        },
    }
}
