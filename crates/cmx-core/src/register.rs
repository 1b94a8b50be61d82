//! # Register Entries
//!
//! A `RegisterEntry` is one regulatory document in the register: a law, a
//! standard, a contract. Besides its descriptive fields it carries an
//! append-only audit `history`.
//!
//! ## History Invariant
//!
//! The first entry of a non-empty history is always the creation entry.
//! History is never reordered and never truncated; the only mutation is
//! [`RegisterEntry::append_history`].
//!
//! ## Patches
//!
//! Saves arrive as a [`RegisterPatch`]: only the fields being changed are
//! present. Presence is tracked with `Option<Option<T>>`: the outer `None`
//! means "key absent, leave the field alone", `Some(None)` means "clear the
//! field". An explicit JSON `null` deserializes to `Some(None)`, which is
//! why the patch fields use [`present`] instead of the default `Option`
//! handling.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CmxError;
use crate::identity::RegisterId;
use crate::temporal::Timestamp;

// ─── Vocabularies ────────────────────────────────────────────────────

/// Kind of regulatory document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    Regulation,
    Law,
    Standard,
    Directive,
    Contract,
    Policy,
    Other,
}

impl DocumentType {
    /// All document types in declaration order.
    pub fn all() -> &'static [DocumentType] {
        &[
            Self::Regulation,
            Self::Law,
            Self::Standard,
            Self::Directive,
            Self::Contract,
            Self::Policy,
            Self::Other,
        ]
    }

    /// The stored string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regulation => "Regulation",
            Self::Law => "Law",
            Self::Standard => "Standard",
            Self::Directive => "Directive",
            Self::Contract => "Contract",
            Self::Policy => "Policy",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = CmxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CmxError::unknown("document type", s))
    }
}

/// Contracting context. Only meaningful when the document type is
/// [`DocumentType::Contract`]; the model does not enforce that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractContext {
    #[serde(rename = "B2B")]
    B2b,
    #[serde(rename = "B2C")]
    B2c,
    #[serde(rename = "B2G")]
    B2g,
    Internal,
}

impl ContractContext {
    /// The stored string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::B2b => "B2B",
            Self::B2c => "B2C",
            Self::B2g => "B2G",
            Self::Internal => "Internal",
        }
    }
}

impl std::fmt::Display for ContractContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a register entry.
///
/// An entry without a status is represented as `Option::None`, which is a
/// bucket of its own in the status counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegisterStatus {
    Open,
    Active,
    Obsolete,
    Archived,
}

impl RegisterStatus {
    /// All statuses in declaration order.
    pub fn all() -> &'static [RegisterStatus] {
        &[Self::Open, Self::Active, Self::Obsolete, Self::Archived]
    }

    /// The stored string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Active => "active",
            Self::Obsolete => "obsolete",
            Self::Archived => "archived",
        }
    }
}

impl std::fmt::Display for RegisterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegisterStatus {
    type Err = CmxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| CmxError::unknown("register status", s))
    }
}

// ─── Audit Entries ───────────────────────────────────────────────────

/// One entry of a register entry's audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    /// When the change was saved.
    pub timestamp: Timestamp,
    /// Who saved it, as a display label.
    pub actor_label: String,
    /// Human-readable description; one line per changed field.
    pub text: String,
}

// ─── Register Entry ──────────────────────────────────────────────────

/// A regulatory document in the register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterEntry {
    /// Immutable identifier.
    pub id: RegisterId,
    #[serde(rename = "type", default)]
    pub doc_type: Option<DocumentType>,
    #[serde(default)]
    pub legal_family: Option<String>,
    #[serde(default)]
    pub contract_context: Option<ContractContext>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    /// Raw ISO date strings, see [`crate::parse_calendar_date`].
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub valid_from: Option<String>,
    #[serde(default)]
    pub valid_to: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: Option<RegisterStatus>,
    #[serde(default)]
    pub creator_first_name: Option<String>,
    #[serde(default)]
    pub creator_last_name: Option<String>,
    #[serde(default)]
    pub creator_department: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    /// Append-only audit trail.
    #[serde(default)]
    pub history: Vec<AuditEntry>,
}

impl RegisterEntry {
    /// Create an empty entry with a fresh identifier and the current time as
    /// creation timestamp. The history starts empty.
    pub fn new() -> Self {
        Self::with_id(RegisterId::new())
    }

    /// Create an empty entry with the given identifier.
    pub fn with_id(id: RegisterId) -> Self {
        Self {
            id,
            doc_type: None,
            legal_family: None,
            contract_context: None,
            code: None,
            title: None,
            topic: None,
            published_date: None,
            valid_from: None,
            valid_to: None,
            due_date: None,
            status: None,
            creator_first_name: None,
            creator_last_name: None,
            creator_department: None,
            created_at: Some(Timestamp::now()),
            history: Vec::new(),
        }
    }

    /// Whether the entry carries enough content to count as created: at
    /// least one of type, code, title or topic is non-empty.
    pub fn is_created(&self) -> bool {
        self.doc_type.is_some()
            || !crate::is_blank(self.code.as_deref())
            || !crate::is_blank(self.title.as_deref())
            || !crate::is_blank(self.topic.as_deref())
    }

    /// Display label of the creator: `"First Last (Department)"`, with
    /// missing parts left out. `None` if no creator field is set.
    pub fn creator_label(&self) -> Option<String> {
        let name = [&self.creator_first_name, &self.creator_last_name]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let department = self
            .creator_department
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());

        match (name.is_empty(), department) {
            (true, None) => None,
            (true, Some(dep)) => Some(dep.to_string()),
            (false, None) => Some(name),
            (false, Some(dep)) => Some(format!("{name} ({dep})")),
        }
    }

    /// Append an audit entry. This is the only way history changes.
    pub fn append_history(&mut self, entry: AuditEntry) {
        self.history.push(entry);
    }
}

impl Default for RegisterEntry {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Patches ─────────────────────────────────────────────────────────

/// Deserialize a patch field whose key is present.
///
/// Serde only calls this when the key exists, so wrapping the inner value in
/// `Some` distinguishes an explicit `null` (`Some(None)`) from a missing key
/// (`None`, via `#[serde(default)]`).
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A partial update of a register entry. Absent keys are left alone.
///
/// Identity, provenance and history are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPatch {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub doc_type: Option<Option<DocumentType>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub legal_family: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub contract_context: Option<Option<ContractContext>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub code: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub topic: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub published_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub status: Option<Option<RegisterStatus>>,
}

impl RegisterPatch {
    /// Whether the patch contains no keys at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the patch to an entry. Empty strings are stored as absent.
    ///
    /// This does not touch history; saving through the store runs the diff
    /// engine first.
    pub fn apply_to(&self, entry: &mut RegisterEntry) {
        fn text(slot: &mut Option<String>, update: &Option<Option<String>>) {
            if let Some(value) = update {
                *slot = value.clone().filter(|s| !s.is_empty());
            }
        }
        fn value<T: Copy>(slot: &mut Option<T>, update: &Option<Option<T>>) {
            if let Some(v) = update {
                *slot = *v;
            }
        }

        value(&mut entry.doc_type, &self.doc_type);
        text(&mut entry.legal_family, &self.legal_family);
        value(&mut entry.contract_context, &self.contract_context);
        text(&mut entry.code, &self.code);
        text(&mut entry.title, &self.title);
        text(&mut entry.topic, &self.topic);
        text(&mut entry.published_date, &self.published_date);
        text(&mut entry.valid_from, &self.valid_from);
        text(&mut entry.valid_to, &self.valid_to);
        text(&mut entry.due_date, &self.due_date);
        value(&mut entry.status, &self.status);
    }

    /// The patch that restores `before`'s values for every key this patch
    /// touches.
    pub fn inverse(&self, before: &RegisterEntry) -> RegisterPatch {
        fn restore<T: Clone, U>(key: &Option<U>, prior: &Option<T>) -> Option<Option<T>> {
            key.as_ref().map(|_| prior.clone())
        }

        RegisterPatch {
            doc_type: restore(&self.doc_type, &before.doc_type),
            legal_family: restore(&self.legal_family, &before.legal_family),
            contract_context: restore(&self.contract_context, &before.contract_context),
            code: restore(&self.code, &before.code),
            title: restore(&self.title, &before.title),
            topic: restore(&self.topic, &before.topic),
            published_date: restore(&self.published_date, &before.published_date),
            valid_from: restore(&self.valid_from, &before.valid_from),
            valid_to: restore(&self.valid_to, &before.valid_to),
            due_date: restore(&self.due_date, &before.due_date),
            status: restore(&self.status, &before.status),
        }
    }
}
