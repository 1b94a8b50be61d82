//! # Register Metrics
//!
//! Roll-ups over the whole register: how many entries sit in each lifecycle
//! status, and how many have a due date that is overdue or coming up.

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use cmx_core::{parse_calendar_date, RegisterEntry, RegisterStatus};

/// Default look-ahead window for "due soon", in days.
pub const DEFAULT_DUE_SOON_DAYS: i64 = 30;

/// Entries per lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub open: usize,
    pub active: usize,
    pub obsolete: usize,
    pub archived: usize,
    /// Entries without a status.
    pub no_status: usize,
    /// All entries, regardless of status.
    pub total: usize,
}

/// Tally register entries by status.
pub fn status_counts(entries: &[RegisterEntry]) -> StatusCounts {
    let mut counts = StatusCounts {
        total: entries.len(),
        ..StatusCounts::default()
    };
    for entry in entries {
        match entry.status {
            Some(RegisterStatus::Open) => counts.open += 1,
            Some(RegisterStatus::Active) => counts.active += 1,
            Some(RegisterStatus::Obsolete) => counts.obsolete += 1,
            Some(RegisterStatus::Archived) => counts.archived += 1,
            None => counts.no_status += 1,
        }
    }
    counts
}

/// Deadline buckets over the register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineStats {
    /// Entries with a parseable due date.
    pub with_deadline: usize,
    /// Due today or within the window (inclusive on both ends).
    pub due_soon: usize,
    /// Due before today.
    pub overdue: usize,
}

/// Classify due dates relative to `today`.
///
/// An entry is overdue if its due date is before `today`, due soon if it
/// falls in `today ..= today + window_days`. Entries whose due date is
/// absent or does not parse are skipped entirely. A window past the end of
/// the calendar extends to [`NaiveDate::MAX`]; a negative window leaves no
/// date due soon.
pub fn deadline_stats(
    entries: &[RegisterEntry],
    today: NaiveDate,
    window_days: i64,
) -> DeadlineStats {
    let horizon = TimeDelta::try_days(window_days)
        .and_then(|d| today.checked_add_signed(d))
        .unwrap_or(if window_days < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        });
    let mut stats = DeadlineStats::default();

    for entry in entries {
        let Some(raw) = entry.due_date.as_deref() else {
            continue;
        };
        let Some(due) = parse_calendar_date(raw) else {
            tracing::warn!(
                entry = %entry.id,
                due_date = raw,
                "unparseable due date excluded from deadline stats"
            );
            continue;
        };

        stats.with_deadline += 1;
        if due < today {
            stats.overdue += 1;
        } else if due <= horizon {
            stats.due_soon += 1;
        }
    }
    stats
}
