//! # Compliance Store
//!
//! An explicit store object replacing ambient global state. It owns the
//! register and matrix collections between [`ComplianceStore::load`] and
//! [`ComplianceStore::save`]; every mutation takes `&mut self`, so there is
//! exactly one writer.
//!
//! ## Orchestration
//!
//! - Register saves run the history diff on the pre-patch record, then apply
//!   the patch.
//! - Register removal runs the deletion guard first. A refusal is
//!   [`StoreError::DeletionBlocked`] carrying every reason.
//! - Matrix documents and clauses are mutated through closures, mirroring a
//!   direct field setter. No diff log is kept on the matrix side.
//! - Nothing is recomputed eagerly. Metrics are computed when asked for.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use cmx_audit::{ensure_creation_entry, HistoryRecorder};
use cmx_core::{
    AuditEntry, ClauseId, MatrixClause, MatrixDocument, MatrixDocumentId, RegisterEntry,
    RegisterId, RegisterPatch,
};
use cmx_engine::{
    assess_document, check_register_deletion, deadline_stats, status_counts, AttachmentCounts,
    DeadlineStats, DeletionCheck, DocumentAssessment, StatusCounts,
};

use crate::error::StoreError;
use crate::persistence::Persistence;

/// Register-wide roll-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOverview {
    pub status: StatusCounts,
    pub deadlines: DeadlineStats,
}

/// Register and matrix collections over a persistence collaborator.
#[derive(Debug)]
pub struct ComplianceStore<P: Persistence> {
    persistence: P,
    recorder: HistoryRecorder,
    register: Vec<RegisterEntry>,
    matrix: Vec<MatrixDocument>,
    dirty: bool,
}

impl<P: Persistence> ComplianceStore<P> {
    /// Create an empty store. Nothing is read until [`Self::load`].
    pub fn new(persistence: P, recorder: HistoryRecorder) -> Self {
        Self {
            persistence,
            recorder,
            register: Vec::new(),
            matrix: Vec::new(),
            dirty: false,
        }
    }

    /// Create a store and load both collections.
    pub fn open(persistence: P, recorder: HistoryRecorder) -> Result<Self, StoreError> {
        let mut store = Self::new(persistence, recorder);
        store.load()?;
        Ok(store)
    }

    /// Replace the in-memory collections with the persisted ones. Unsaved
    /// changes are discarded.
    pub fn load(&mut self) -> Result<(), StoreError> {
        let register = self.persistence.load_register()?;
        let matrix = self.persistence.load_matrix()?;
        tracing::debug!(
            register = register.len(),
            matrix = matrix.len(),
            "store loaded"
        );
        self.register = register;
        self.matrix = matrix;
        self.dirty = false;
        Ok(())
    }

    /// Write both collections.
    pub fn save(&mut self) -> Result<(), StoreError> {
        self.persistence.save_register(&self.register)?;
        self.persistence.save_matrix(&self.matrix)?;
        tracing::debug!(
            register = self.register.len(),
            matrix = self.matrix.len(),
            "store saved"
        );
        self.dirty = false;
        Ok(())
    }

    /// Whether there are changes since the last load or save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn recorder(&self) -> &HistoryRecorder {
        &self.recorder
    }

    // -- Register -------------------------------------------------------------

    pub fn register_entries(&self) -> &[RegisterEntry] {
        &self.register
    }

    pub fn register_entry(&self, id: &RegisterId) -> Option<&RegisterEntry> {
        self.register.iter().find(|e| &e.id == id)
    }

    fn register_index(&self, id: &RegisterId) -> Result<usize, StoreError> {
        self.register
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| StoreError::UnknownRegisterEntry(id.clone()))
    }

    /// Add a new register entry.
    ///
    /// The entry must count as created (type, code, title or topic set).
    /// Its history starts with the creation entry.
    pub fn create_register_entry(
        &mut self,
        mut entry: RegisterEntry,
    ) -> Result<&RegisterEntry, StoreError> {
        if !entry.is_created() {
            return Err(StoreError::EmptyEntry(entry.id));
        }
        if self.register_entry(&entry.id).is_some() {
            return Err(StoreError::DuplicateRegisterEntry(entry.id));
        }
        ensure_creation_entry(&mut entry);
        tracing::info!(entry = %entry.id, "register entry created");
        self.register.push(entry);
        self.dirty = true;
        let last = self.register.len() - 1;
        Ok(&self.register[last])
    }

    /// Save a patch to a register entry.
    ///
    /// Returns the audit entry appended for the changes, or `None` if the
    /// patch changed nothing that is tracked.
    pub fn update_register_entry(
        &mut self,
        id: &RegisterId,
        patch: &RegisterPatch,
    ) -> Result<Option<AuditEntry>, StoreError> {
        let idx = self.register_index(id)?;
        let entry = &mut self.register[idx];
        let audit = self.recorder.record(entry, patch);
        patch.apply_to(entry);
        if !patch.is_empty() {
            self.dirty = true;
        }
        Ok(audit)
    }

    /// Evaluate the deletion guard without deleting.
    pub fn check_deletion(&self, id: &RegisterId) -> Result<DeletionCheck, StoreError> {
        let idx = self.register_index(id)?;
        Ok(check_register_deletion(&self.register[idx], &self.matrix))
    }

    /// Remove a register entry if the deletion guard allows it. Nothing else
    /// is removed with it.
    pub fn remove_register_entry(&mut self, id: &RegisterId) -> Result<RegisterEntry, StoreError> {
        let check = self.check_deletion(id)?;
        if !check.is_allowed() {
            tracing::warn!(
                entry = %id,
                reasons = ?check.messages(),
                "register entry deletion refused"
            );
            return Err(StoreError::DeletionBlocked {
                id: id.clone(),
                reasons: check.reasons,
            });
        }
        let idx = self.register_index(id)?;
        let removed = self.register.remove(idx);
        self.dirty = true;
        tracing::info!(entry = %id, "register entry deleted");
        Ok(removed)
    }

    /// Status counts and deadline buckets over the whole register.
    pub fn register_overview(&self, today: NaiveDate, window_days: i64) -> RegisterOverview {
        RegisterOverview {
            status: status_counts(&self.register),
            deadlines: deadline_stats(&self.register, today, window_days),
        }
    }

    // -- Matrix ---------------------------------------------------------------

    pub fn matrix_documents(&self) -> &[MatrixDocument] {
        &self.matrix
    }

    pub fn matrix_document(&self, id: &MatrixDocumentId) -> Option<&MatrixDocument> {
        self.matrix.iter().find(|d| &d.id == id)
    }

    /// The first matrix document assessing `register_id`, if any.
    pub fn matrix_for_entry(&self, register_id: &RegisterId) -> Option<&MatrixDocument> {
        self.matrix.iter().find(|d| &d.register_id == register_id)
    }

    fn matrix_index(&self, id: &MatrixDocumentId) -> Result<usize, StoreError> {
        self.matrix
            .iter()
            .position(|d| &d.id == id)
            .ok_or_else(|| StoreError::UnknownMatrixDocument(id.clone()))
    }

    /// Fetch the matrix document for a register entry, creating an empty
    /// draft from the entry's current values if there is none.
    pub fn get_or_create_matrix(
        &mut self,
        register_id: &RegisterId,
    ) -> Result<&MatrixDocument, StoreError> {
        if let Some(idx) = self
            .matrix
            .iter()
            .position(|d| &d.register_id == register_id)
        {
            return Ok(&self.matrix[idx]);
        }
        let entry = self
            .register_entry(register_id)
            .ok_or_else(|| StoreError::UnknownRegisterEntry(register_id.clone()))?;
        let doc = MatrixDocument::for_entry(entry);
        tracing::info!(entry = %register_id, document = %doc.id, "matrix document created");
        self.matrix.push(doc);
        self.dirty = true;
        let last = self.matrix.len() - 1;
        Ok(&self.matrix[last])
    }

    /// Mutate a matrix document's own fields (status, risk configuration).
    pub fn update_matrix_document(
        &mut self,
        id: &MatrixDocumentId,
        f: impl FnOnce(&mut MatrixDocument),
    ) -> Result<&MatrixDocument, StoreError> {
        let idx = self.matrix_index(id)?;
        let doc = &mut self.matrix[idx];
        f(doc);
        doc.touch();
        self.dirty = true;
        Ok(&self.matrix[idx])
    }

    pub fn remove_matrix_document(
        &mut self,
        id: &MatrixDocumentId,
    ) -> Result<MatrixDocument, StoreError> {
        let idx = self.matrix_index(id)?;
        let removed = self.matrix.remove(idx);
        self.dirty = true;
        tracing::info!(document = %id, clauses = removed.clauses.len(), "matrix document deleted");
        Ok(removed)
    }

    /// Append an empty clause and return its id.
    pub fn add_clause(&mut self, document: &MatrixDocumentId) -> Result<ClauseId, StoreError> {
        let idx = self.matrix_index(document)?;
        let clause = MatrixClause::new();
        let id = clause.id.clone();
        let doc = &mut self.matrix[idx];
        doc.clauses.push(clause);
        doc.touch();
        self.dirty = true;
        Ok(id)
    }

    /// Mutate one clause.
    pub fn update_clause(
        &mut self,
        document: &MatrixDocumentId,
        clause: &ClauseId,
        f: impl FnOnce(&mut MatrixClause),
    ) -> Result<&MatrixClause, StoreError> {
        let idx = self.matrix_index(document)?;
        let doc = &mut self.matrix[idx];
        let Some(pos) = doc.clauses.iter().position(|c| &c.id == clause) else {
            return Err(StoreError::UnknownClause {
                document: document.clone(),
                clause: clause.clone(),
            });
        };
        f(&mut doc.clauses[pos]);
        doc.touch();
        self.dirty = true;
        Ok(&self.matrix[idx].clauses[pos])
    }

    pub fn remove_clause(
        &mut self,
        document: &MatrixDocumentId,
        clause: &ClauseId,
    ) -> Result<MatrixClause, StoreError> {
        let idx = self.matrix_index(document)?;
        let doc = &mut self.matrix[idx];
        let Some(pos) = doc.clauses.iter().position(|c| &c.id == clause) else {
            return Err(StoreError::UnknownClause {
                document: document.clone(),
                clause: clause.clone(),
            });
        };
        let removed = doc.clauses.remove(pos);
        doc.touch();
        self.dirty = true;
        Ok(removed)
    }

    /// Assess a matrix document.
    pub fn assess(
        &self,
        document: &MatrixDocumentId,
        attachments: &impl AttachmentCounts,
    ) -> Result<DocumentAssessment, StoreError> {
        let idx = self.matrix_index(document)?;
        Ok(assess_document(&self.matrix[idx], attachments))
    }

    /// Assess the matrix document of a register entry.
    pub fn assess_entry(
        &self,
        register_id: &RegisterId,
        attachments: &impl AttachmentCounts,
    ) -> Result<DocumentAssessment, StoreError> {
        if self.register_entry(register_id).is_none() {
            return Err(StoreError::UnknownRegisterEntry(register_id.clone()));
        }
        let doc = self
            .matrix_for_entry(register_id)
            .ok_or_else(|| StoreError::NoMatrixForEntry(register_id.clone()))?;
        Ok(assess_document(doc, attachments))
    }
}
