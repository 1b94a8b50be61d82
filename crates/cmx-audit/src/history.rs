//! # History Diff
//!
//! ## Algorithm
//!
//! [`TRACKED_FIELDS`] lists the audited fields in a fixed order. For each
//! field whose key is present in the patch:
//!
//! 1. Read the current and proposed value as text.
//! 2. Normalize `None` and `""` to absent.
//! 3. Skip the field if both sides are equal. Date fields compare as
//!    calendar dates when both sides parse, so `2026-03-01` and
//!    `2026-03-01T00:00:00Z` are the same value.
//! 4. Otherwise render one message according to the field's [`FieldKind`].
//!
//! The messages of one pass are joined with newlines into a single
//! [`AuditEntry`]. Zero messages means no entry.
//!
//! ## Message Catalogue
//!
//! | Kind | Case | Text |
//! |------|------|------|
//! | plain | any change | `{label} von "{before}" auf "{after}" geändert` |
//! | date | set | `{label} auf {date} gesetzt` |
//! | date | removed | `{label}-Datum entfernt` |
//! | date | changed | `{label} von {before} auf {after} geändert` |
//! | status | set | `Dokumentenstatus auf "{after}" gesetzt` |
//! | status | removed | `Dokumentenstatus entfernt` |
//! | status | changed | `Dokumentenstatus von "{before}" auf "{after}" geändert` |
//!
//! Absent values in plain messages render as `—`.

use cmx_core::{parse_calendar_date, AuditEntry, RegisterEntry, RegisterPatch, Timestamp};

use crate::locale::DisplayLocale;

/// Actor label used when the caller supplies none.
pub const DEFAULT_ACTOR_LABEL: &str = "Administrator";

/// Text of the synthesized creation entry.
pub const CREATION_TEXT: &str = "Dokument angelegt";

/// Label used in every status message.
pub const STATUS_LABEL: &str = "Dokumentenstatus";

const ABSENT: &str = "—";

/// How a tracked field's change is phrased.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Plain,
    Date,
    Status,
}

/// One audited field of a register entry.
#[derive(Clone, Copy)]
pub struct TrackedField {
    /// Patch key, as serialized.
    pub key: &'static str,
    /// Display label used in messages.
    pub label: &'static str,
    pub kind: FieldKind,
    current: fn(&RegisterEntry) -> Option<String>,
    proposed: fn(&RegisterPatch) -> Option<Option<String>>,
}

impl std::fmt::Debug for TrackedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackedField")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Audited fields, in message order.
pub const TRACKED_FIELDS: &[TrackedField] = &[
    TrackedField {
        key: "type",
        label: "Dokumententyp",
        kind: FieldKind::Plain,
        current: |e| e.doc_type.map(|t| t.as_str().to_string()),
        proposed: |p| p.doc_type.map(|v| v.map(|t| t.as_str().to_string())),
    },
    TrackedField {
        key: "legalFamily",
        label: "Rechtsfamilie",
        kind: FieldKind::Plain,
        current: |e| e.legal_family.clone(),
        proposed: |p| p.legal_family.clone(),
    },
    TrackedField {
        key: "contractContext",
        label: "Vertragskontext",
        kind: FieldKind::Plain,
        current: |e| e.contract_context.map(|c| c.as_str().to_string()),
        proposed: |p| p.contract_context.map(|v| v.map(|c| c.as_str().to_string())),
    },
    TrackedField {
        key: "code",
        label: "Kürzel",
        kind: FieldKind::Plain,
        current: |e| e.code.clone(),
        proposed: |p| p.code.clone(),
    },
    TrackedField {
        key: "title",
        label: "Titel",
        kind: FieldKind::Plain,
        current: |e| e.title.clone(),
        proposed: |p| p.title.clone(),
    },
    TrackedField {
        key: "topic",
        label: "Themengebiet",
        kind: FieldKind::Plain,
        current: |e| e.topic.clone(),
        proposed: |p| p.topic.clone(),
    },
    TrackedField {
        key: "publishedDate",
        label: "Veröffentlichung",
        kind: FieldKind::Date,
        current: |e| e.published_date.clone(),
        proposed: |p| p.published_date.clone(),
    },
    TrackedField {
        key: "validFrom",
        label: "Gültig ab",
        kind: FieldKind::Date,
        current: |e| e.valid_from.clone(),
        proposed: |p| p.valid_from.clone(),
    },
    TrackedField {
        key: "validTo",
        label: "Gültig bis",
        kind: FieldKind::Date,
        current: |e| e.valid_to.clone(),
        proposed: |p| p.valid_to.clone(),
    },
    TrackedField {
        key: "dueDate",
        label: "Fälligkeit",
        kind: FieldKind::Date,
        current: |e| e.due_date.clone(),
        proposed: |p| p.due_date.clone(),
    },
    TrackedField {
        key: "status",
        label: STATUS_LABEL,
        kind: FieldKind::Status,
        current: |e| e.status.map(|s| s.as_str().to_string()),
        proposed: |p| p.status.map(|v| v.map(|s| s.as_str().to_string())),
    },
];

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn same_value(kind: FieldKind, before: &Option<String>, after: &Option<String>) -> bool {
    match (kind, before, after) {
        (FieldKind::Date, Some(b), Some(a)) => {
            match (parse_calendar_date(b), parse_calendar_date(a)) {
                (Some(db), Some(da)) => db == da,
                _ => b == a,
            }
        }
        _ => before == after,
    }
}

fn message(
    field: &TrackedField,
    before: Option<&str>,
    after: Option<&str>,
    locale: DisplayLocale,
) -> String {
    let label = field.label;
    match field.kind {
        FieldKind::Plain => format!(
            "{label} von \"{}\" auf \"{}\" geändert",
            before.unwrap_or(ABSENT),
            after.unwrap_or(ABSENT)
        ),
        FieldKind::Date => match (before, after) {
            (None, Some(a)) => format!("{label} auf {} gesetzt", locale.format_date(a)),
            (Some(_), None) => format!("{label}-Datum entfernt"),
            (Some(b), Some(a)) => format!(
                "{label} von {} auf {} geändert",
                locale.format_date(b),
                locale.format_date(a)
            ),
            (None, None) => String::new(),
        },
        FieldKind::Status => match (before, after) {
            (None, Some(a)) => format!("{label} auf \"{a}\" gesetzt"),
            (Some(_), None) => format!("{label} entfernt"),
            (Some(b), Some(a)) => format!("{label} von \"{b}\" auf \"{a}\" geändert"),
            (None, None) => String::new(),
        },
    }
}

/// Change messages for applying `patch` to `entry`, in tracked-field order.
///
/// Only keys present in the patch are considered. The entry is not modified.
pub fn diff_messages(
    entry: &RegisterEntry,
    patch: &RegisterPatch,
    locale: DisplayLocale,
) -> Vec<String> {
    TRACKED_FIELDS
        .iter()
        .filter_map(|field| {
            let proposed = (field.proposed)(patch)?;
            let before = normalize((field.current)(entry));
            let after = normalize(proposed);
            if same_value(field.kind, &before, &after) {
                return None;
            }
            Some(message(field, before.as_deref(), after.as_deref(), locale))
        })
        .collect()
}

/// The creation entry for `entry`, built from its provenance fields.
///
/// Falls back to the current time when `created_at` is missing, and to
/// [`DEFAULT_ACTOR_LABEL`] when no creator is recorded.
pub fn creation_entry(entry: &RegisterEntry) -> AuditEntry {
    AuditEntry {
        timestamp: entry.created_at.unwrap_or_else(Timestamp::now),
        actor_label: entry
            .creator_label()
            .unwrap_or_else(|| DEFAULT_ACTOR_LABEL.to_string()),
        text: CREATION_TEXT.to_string(),
    }
}

/// Backfill the creation entry if the history is empty.
///
/// Returns whether an entry was added. Running this on an entry that already
/// has history does nothing.
pub fn ensure_creation_entry(entry: &mut RegisterEntry) -> bool {
    if !entry.history.is_empty() {
        return false;
    }
    let created = creation_entry(entry);
    entry.append_history(created);
    true
}

/// Appends audit entries on behalf of one actor.
#[derive(Debug, Clone)]
pub struct HistoryRecorder {
    actor_label: String,
    locale: DisplayLocale,
}

impl Default for HistoryRecorder {
    fn default() -> Self {
        Self::new(DEFAULT_ACTOR_LABEL, DisplayLocale::default())
    }
}

impl HistoryRecorder {
    /// Create a recorder for the given actor and display locale.
    pub fn new(actor_label: impl Into<String>, locale: DisplayLocale) -> Self {
        Self {
            actor_label: actor_label.into(),
            locale,
        }
    }

    /// The actor label written into audit entries.
    pub fn actor_label(&self) -> &str {
        &self.actor_label
    }

    /// The locale used for dates in audit text.
    pub fn locale(&self) -> DisplayLocale {
        self.locale
    }

    /// Diff `patch` against the pre-patch `entry` and append the resulting
    /// audit entry, timestamped now. The patch itself is not applied.
    pub fn record(&self, entry: &mut RegisterEntry, patch: &RegisterPatch) -> Option<AuditEntry> {
        self.record_at(entry, patch, Timestamp::now())
    }

    /// As [`HistoryRecorder::record`], with an explicit timestamp.
    pub fn record_at(
        &self,
        entry: &mut RegisterEntry,
        patch: &RegisterPatch,
        at: Timestamp,
    ) -> Option<AuditEntry> {
        let messages = diff_messages(entry, patch, self.locale);
        if messages.is_empty() {
            return None;
        }

        if ensure_creation_entry(entry) {
            tracing::debug!(entry = %entry.id, "backfilled creation entry");
        }
        let audit = AuditEntry {
            timestamp: at,
            actor_label: self.actor_label.clone(),
            text: messages.join("\n"),
        };
        entry.append_history(audit.clone());
        tracing::debug!(
            entry = %entry.id,
            changes = messages.len(),
            history_len = entry.history.len(),
            "appended audit entry"
        );
        Some(audit)
    }
}
