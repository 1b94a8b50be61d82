//! # Compliance Matrix Records
//!
//! A `MatrixDocument` is the compliance assessment of one register entry.
//! Its `clauses` are the assessable requirements, each rated for compliance
//! status, PSOE maturity and risk, and backed by evidence.
//!
//! ## Statuses Are Free Setters
//!
//! Neither [`MatrixStatus`] nor [`ComplianceStatus`] has transition rules;
//! any value may be set at any time. Both are enums so that every reader
//! matches them exhaustively.
//!
//! ## Clause Hierarchy
//!
//! `parent_id` is a plain back-reference by id, reserved for grouping. No
//! computation follows it.

use serde::{Deserialize, Serialize};

use crate::identity::{ClauseId, MatrixDocumentId, ReferenceId, RegisterId};
use crate::register::{DocumentType, RegisterEntry};
use crate::temporal::Timestamp;

/// Number of reference levels a clause can carry (e.g. `4.1` / `(a)` / `(1)`).
pub const CLAUSE_DEPTH: usize = 3;

// ─── Vocabularies ────────────────────────────────────────────────────

/// Editorial status of a matrix document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixStatus {
    #[default]
    Draft,
    InReview,
    Final,
}

impl MatrixStatus {
    /// The stored string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InReview => "in_review",
            Self::Final => "final",
        }
    }
}

impl std::fmt::Display for MatrixStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How per-clause risk scores roll up to one document value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskAggregationMode {
    /// Maximum score in scope.
    #[default]
    WorstCase,
    /// Arithmetic mean of the scores in scope.
    Index,
}

/// Which clauses take part in risk aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskScope {
    /// Every clause with a risk score.
    #[default]
    All,
    /// Scored clauses whose status is not `compliant`.
    NonCompliant,
}

/// Assessment result of one clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    #[default]
    Open,
    Compliant,
    NotFulfilled,
    NotApplicable,
}

impl ComplianceStatus {
    /// All statuses in declaration order.
    pub fn all() -> &'static [ComplianceStatus] {
        &[
            Self::Open,
            Self::Compliant,
            Self::NotFulfilled,
            Self::NotApplicable,
        ]
    }

    /// The stored string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Compliant => "compliant",
            Self::NotFulfilled => "not_fulfilled",
            Self::NotApplicable => "not_applicable",
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PSOE maturity scale: Present, Suitable, Operational, Effective.
///
/// Declaration order is the scale order and drives the nearest-level
/// tie-break in maturity aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum MaturityLevel {
    P = 1,
    S = 2,
    O = 3,
    E = 4,
}

impl MaturityLevel {
    /// All levels in scale order.
    pub fn all() -> &'static [MaturityLevel] {
        &[Self::P, Self::S, Self::O, Self::E]
    }

    /// Numeric score, P=1 through E=4.
    pub fn score(&self) -> u8 {
        *self as u8
    }

    /// Long name of the level.
    pub fn name(&self) -> &'static str {
        match self {
            Self::P => "Present",
            Self::S => "Suitable",
            Self::O => "Operational",
            Self::E => "Effective",
        }
    }
}

impl std::fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::P => "P",
            Self::S => "S",
            Self::O => "O",
            Self::E => "E",
        };
        f.write_str(s)
    }
}

// ─── Clause References ───────────────────────────────────────────────

/// One level of a clause's numbering, e.g. label `4.1`, title `Scope`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseReference {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Link to a chapter of an internal manual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualRef {
    pub id: ReferenceId,
    #[serde(default)]
    pub exposition: String,
    #[serde(default)]
    pub chapter: String,
    #[serde(default)]
    pub description: String,
}

/// Link to a documented process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRef {
    pub id: ReferenceId,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub title: String,
}

/// Link to a form or template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRef {
    pub id: ReferenceId,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub title: String,
}

// ─── Matrix Clause ───────────────────────────────────────────────────

/// One assessable requirement within a matrix document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixClause {
    pub id: ClauseId,
    #[serde(default)]
    pub parent_id: Option<ClauseId>,
    /// Reference levels, outermost first.
    #[serde(default)]
    pub references: [ClauseReference; CLAUSE_DEPTH],
    #[serde(default)]
    pub requirement_text: String,
    #[serde(default)]
    pub evidence_note: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub compliance_status: ComplianceStatus,
    #[serde(default)]
    pub maturity_level: Option<MaturityLevel>,
    /// 1..=4 when set.
    #[serde(default)]
    pub risk_severity: Option<u8>,
    /// 1..=4 when set.
    #[serde(default)]
    pub risk_probability: Option<u8>,
    #[serde(default)]
    pub internal_manual_refs: Vec<ManualRef>,
    #[serde(default)]
    pub process_refs: Vec<ProcessRef>,
    #[serde(default)]
    pub form_refs: Vec<FormRef>,
}

impl MatrixClause {
    /// Create an empty clause: no references, status `open`, unrated.
    pub fn new() -> Self {
        Self {
            id: ClauseId::new(),
            parent_id: None,
            references: Default::default(),
            requirement_text: String::new(),
            evidence_note: String::new(),
            comment: String::new(),
            compliance_status: ComplianceStatus::Open,
            maturity_level: None,
            risk_severity: None,
            risk_probability: None,
            internal_manual_refs: Vec::new(),
            process_refs: Vec::new(),
            form_refs: Vec::new(),
        }
    }

    /// Set the reference label and title at `level` (0-based). Levels beyond
    /// [`CLAUSE_DEPTH`] are ignored.
    pub fn set_reference(&mut self, level: usize, label: Option<&str>, title: Option<&str>) {
        if let Some(slot) = self.references.get_mut(level) {
            slot.label = label.map(str::to_string);
            slot.title = title.map(str::to_string);
        }
    }

    /// Add an empty manual reference and return its id.
    pub fn add_manual_ref(&mut self) -> ReferenceId {
        let id = ReferenceId::new();
        self.internal_manual_refs.push(ManualRef {
            id: id.clone(),
            exposition: String::new(),
            chapter: String::new(),
            description: String::new(),
        });
        id
    }

    /// Add an empty process reference and return its id.
    pub fn add_process_ref(&mut self) -> ReferenceId {
        let id = ReferenceId::new();
        self.process_refs.push(ProcessRef {
            id: id.clone(),
            number: String::new(),
            title: String::new(),
        });
        id
    }

    /// Add an empty form reference and return its id.
    pub fn add_form_ref(&mut self) -> ReferenceId {
        let id = ReferenceId::new();
        self.form_refs.push(FormRef {
            id: id.clone(),
            number: String::new(),
            title: String::new(),
        });
        id
    }

    /// Remove a manual, process or form reference by id. Returns whether a
    /// reference was removed.
    pub fn remove_ref(&mut self, id: &ReferenceId) -> bool {
        let before =
            self.internal_manual_refs.len() + self.process_refs.len() + self.form_refs.len();
        self.internal_manual_refs.retain(|r| &r.id != id);
        self.process_refs.retain(|r| &r.id != id);
        self.form_refs.retain(|r| &r.id != id);
        let after =
            self.internal_manual_refs.len() + self.process_refs.len() + self.form_refs.len();
        after < before
    }
}

impl Default for MatrixClause {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Matrix Document ─────────────────────────────────────────────────

/// Compliance assessment of one register entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixDocument {
    pub id: MatrixDocumentId,
    /// The assessed register entry.
    pub register_id: RegisterId,
    /// Snapshot of the register entry at matrix creation. Not kept in sync.
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type", default)]
    pub doc_type: Option<DocumentType>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub status: MatrixStatus,
    #[serde(default)]
    pub risk_aggregation_mode: RiskAggregationMode,
    #[serde(default)]
    pub risk_scope: RiskScope,
    #[serde(default)]
    pub clauses: Vec<MatrixClause>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl MatrixDocument {
    /// Create an empty draft matrix for a register entry, snapshotting its
    /// code, title, type and topic.
    pub fn for_entry(entry: &RegisterEntry) -> Self {
        let now = Timestamp::now();
        Self {
            id: MatrixDocumentId::new(),
            register_id: entry.id.clone(),
            code: entry.code.clone(),
            title: entry.title.clone(),
            doc_type: entry.doc_type,
            topic: entry.topic.clone(),
            status: MatrixStatus::Draft,
            risk_aggregation_mode: RiskAggregationMode::default(),
            risk_scope: RiskScope::default(),
            clauses: Vec::new(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Look up a clause by id.
    pub fn clause(&self, id: &ClauseId) -> Option<&MatrixClause> {
        self.clauses.iter().find(|c| &c.id == id)
    }

    /// Look up a clause by id for mutation.
    pub fn clause_mut(&mut self, id: &ClauseId) -> Option<&mut MatrixClause> {
        self.clauses.iter_mut().find(|c| &c.id == id)
    }

    /// Record a modification.
    pub fn touch(&mut self) {
        self.updated_at = Some(Timestamp::now());
    }
}
