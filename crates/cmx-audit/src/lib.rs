//! # cmx-audit — Register History Diff Engine
//!
//! Reconstructs human-readable audit entries from before/after snapshots of
//! a register entry.
//!
//! - **History** (`history.rs`): the tracked-field table, per-kind message
//!   formatting, the creation-entry backfill, and [`HistoryRecorder`], which
//!   appends one audit entry per save.
//!
//! - **Locale** (`locale.rs`): display formatting of calendar dates.
//!
//! ## Invariants
//!
//! - One save produces at most one audit entry. All field changes of the
//!   save are joined with newlines into that entry's text.
//! - A save that changes nothing appends nothing.
//! - History is appended to, never reordered or rewritten.
//! - The first entry of a non-empty history is the creation entry.
//! - Nothing here fails. Malformed dates are shown as their raw text.

pub mod history;
pub mod locale;

pub use history::{
    creation_entry, diff_messages, ensure_creation_entry, FieldKind, HistoryRecorder,
    TrackedField, CREATION_TEXT, DEFAULT_ACTOR_LABEL, STATUS_LABEL, TRACKED_FIELDS,
};
pub use locale::DisplayLocale;
