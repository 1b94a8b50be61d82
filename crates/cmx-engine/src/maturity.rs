//! # PSOE Maturity Aggregation
//!
//! Averages the maturity scores of all rated clauses and maps the average
//! back to the nearest discrete level.
//!
//! ## Tie-Break
//!
//! [`nearest_level`] walks the levels in scale order and replaces the current
//! best only on a strictly smaller distance. An average exactly between two
//! levels therefore resolves to the lower one: `[P, E]` averages to 2.5 and
//! maps to `S`, not `O`. Stored reports depend on this; keep the comparison
//! strict.

use serde::{Deserialize, Serialize};

use cmx_core::{MatrixClause, MaturityLevel};

/// Maturity roll-up of a clause list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaturitySummary {
    /// Clauses with a maturity level.
    pub assessed: usize,
    /// Mean score, `None` when nothing is assessed.
    pub avg_score: Option<f64>,
    /// Level nearest to the mean, `None` when nothing is assessed.
    pub level: Option<MaturityLevel>,
    /// Clause count per level, in P/S/O/E order.
    pub distribution: [usize; 4],
}

impl MaturitySummary {
    /// Whether at least one clause has been rated.
    pub fn is_assessed(&self) -> bool {
        self.level.is_some()
    }
}

/// Map an average score to the nearest level. Ties go to the lower level.
pub fn nearest_level(avg_score: f64) -> Option<MaturityLevel> {
    let mut best: Option<MaturityLevel> = None;
    let mut best_diff = f64::INFINITY;
    for level in MaturityLevel::all() {
        let diff = (f64::from(level.score()) - avg_score).abs();
        if diff < best_diff {
            best = Some(*level);
            best_diff = diff;
        }
    }
    best
}

/// Aggregate clause maturity.
pub fn maturity_summary(clauses: &[MatrixClause]) -> MaturitySummary {
    let mut summary = MaturitySummary::default();
    let mut sum: u32 = 0;

    for level in clauses.iter().filter_map(|c| c.maturity_level) {
        summary.assessed += 1;
        summary.distribution[usize::from(level.score() - 1)] += 1;
        sum += u32::from(level.score());
    }

    if summary.assessed > 0 {
        let avg = f64::from(sum) / summary.assessed as f64;
        summary.avg_score = Some(avg);
        summary.level = nearest_level(avg);
    }
    summary
}
