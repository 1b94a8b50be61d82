//! # Clause Compliance Stats
//!
//! Status counts over one document's clauses. `open` is the remainder after
//! the three assessed outcomes.

use serde::{Deserialize, Serialize};

use cmx_core::{ComplianceStatus, MatrixClause};

/// Status partition of a clause list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClauseComplianceStats {
    pub total: usize,
    pub compliant_count: usize,
    pub not_fulfilled_count: usize,
    pub not_applicable_count: usize,
    pub open_count: usize,
    /// `round(compliant / total * 100)`, 0 for an empty list.
    pub fulfillment_pct: u8,
}

/// Count clauses by compliance status.
pub fn clause_compliance_stats(clauses: &[MatrixClause]) -> ClauseComplianceStats {
    let mut stats = ClauseComplianceStats {
        total: clauses.len(),
        ..ClauseComplianceStats::default()
    };
    for clause in clauses {
        match clause.compliance_status {
            ComplianceStatus::Open => stats.open_count += 1,
            ComplianceStatus::Compliant => stats.compliant_count += 1,
            ComplianceStatus::NotFulfilled => stats.not_fulfilled_count += 1,
            ComplianceStatus::NotApplicable => stats.not_applicable_count += 1,
        }
    }
    stats.fulfillment_pct = fulfillment_pct(stats.compliant_count, stats.total);
    stats
}

fn fulfillment_pct(compliant: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (compliant as f64 / total as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn clause(status: ComplianceStatus) -> MatrixClause {
        MatrixClause {
            compliance_status: status,
            ..MatrixClause::new()
        }
    }

    #[test]
    fn test_empty_list_is_zero_percent() {
        let s = clause_compliance_stats(&[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.fulfillment_pct, 0);
    }

    #[test]
    fn test_partition() {
        let clauses = vec![
            clause(ComplianceStatus::Compliant),
            clause(ComplianceStatus::Compliant),
            clause(ComplianceStatus::NotFulfilled),
            clause(ComplianceStatus::NotApplicable),
            clause(ComplianceStatus::Open),
            clause(ComplianceStatus::Open),
        ];
        let s = clause_compliance_stats(&clauses);
        assert_eq!(s.total, 6);
        assert_eq!(s.compliant_count, 2);
        assert_eq!(s.not_fulfilled_count, 1);
        assert_eq!(s.not_applicable_count, 1);
        assert_eq!(s.open_count, 2);
        // 2/6 = 33.33..%
        assert_eq!(s.fulfillment_pct, 33);
    }

    #[test]
    fn test_rounds_half_up() {
        // 1/8 = 12.5% → 13
        let mut clauses = vec![clause(ComplianceStatus::Compliant)];
        clauses.extend((0..7).map(|_| clause(ComplianceStatus::Open)));
        assert_eq!(clause_compliance_stats(&clauses).fulfillment_pct, 13);
    }

    fn any_status() -> impl Strategy<Value = ComplianceStatus> {
        prop::sample::select(ComplianceStatus::all().to_vec())
    }

    proptest! {
        /// The assessed buckets never exceed the total; the remainder is open.
        #[test]
        fn assessed_buckets_bounded_by_total(
            statuses in prop::collection::vec(any_status(), 0..64)
        ) {
            let clauses: Vec<_> = statuses.iter().copied().map(clause).collect();
            let s = clause_compliance_stats(&clauses);
            let assessed = s.compliant_count + s.not_fulfilled_count + s.not_applicable_count;
            prop_assert!(assessed <= s.total);
            let open = statuses.iter().filter(|st| **st == ComplianceStatus::Open).count();
            prop_assert_eq!(s.total - assessed, open);
            prop_assert_eq!(s.open_count, open);
        }

        /// Fulfillment is a percentage.
        #[test]
        fn fulfillment_pct_in_range(statuses in prop::collection::vec(any_status(), 0..64)) {
            let clauses: Vec<_> = statuses.into_iter().map(clause).collect();
            let s = clause_compliance_stats(&clauses);
            prop_assert!(s.fulfillment_pct <= 100);
            if s.total == 0 {
                prop_assert_eq!(s.fulfillment_pct, 0);
            }
        }
    }
}
