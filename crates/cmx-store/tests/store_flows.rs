//! End-to-end store flows over JSON files in a temporary data directory.

use proptest::prelude::*;

use cmx_audit::{DisplayLocale, HistoryRecorder, CREATION_TEXT};
use cmx_core::{
    ComplianceStatus, DocumentType, RegisterEntry, RegisterPatch, RegisterStatus,
};
use cmx_engine::{DeletionBlocker, NoAttachments};
use cmx_store::{ComplianceStore, JsonFilePersistence, MemoryPersistence, StoreError};

fn recorder() -> HistoryRecorder {
    HistoryRecorder::new("Kim Berger (Legal)", DisplayLocale::De)
}

fn entry(code: &str) -> RegisterEntry {
    let mut e = RegisterEntry::new();
    e.code = Some(code.to_string());
    e.doc_type = Some(DocumentType::Regulation);
    e
}

#[test]
fn edits_survive_reopen_from_disk() {
    let dir = tempfile::tempdir().unwrap();

    let (id, doc, clause) = {
        let mut store =
            ComplianceStore::open(JsonFilePersistence::new(dir.path()), recorder()).unwrap();
        let id = store.create_register_entry(entry("DSGVO")).unwrap().id.clone();
        store
            .update_register_entry(
                &id,
                &RegisterPatch {
                    due_date: Some(Some("2026-05-25".into())),
                    status: Some(Some(RegisterStatus::Open)),
                    ..Default::default()
                },
            )
            .unwrap();
        let doc = store.get_or_create_matrix(&id).unwrap().id.clone();
        let clause = store.add_clause(&doc).unwrap();
        store
            .update_clause(&doc, &clause, |c| {
                c.set_reference(0, Some("Art. 32"), Some("Sicherheit der Verarbeitung"));
                c.compliance_status = ComplianceStatus::Compliant;
                c.evidence_note = "TOM-Dokumentation v3".into();
            })
            .unwrap();
        store.save().unwrap();
        (id, doc, clause)
    };

    let store = ComplianceStore::open(JsonFilePersistence::new(dir.path()), recorder()).unwrap();
    let e = store.register_entry(&id).unwrap();
    assert_eq!(e.history.len(), 2);
    assert_eq!(e.history[0].text, CREATION_TEXT);
    assert_eq!(
        e.history[1].text,
        "Fälligkeit auf 25.05.2026 gesetzt\nDokumentenstatus auf \"open\" gesetzt"
    );
    assert_eq!(e.history[1].actor_label, "Kim Berger (Legal)");

    let report = store.assess(&doc, &NoAttachments).unwrap();
    assert_eq!(report.clauses.len(), 1);
    assert_eq!(report.clauses[0].clause_id, clause);
    assert_eq!(report.clauses[0].reference, "Art. 32");
    assert!(report.clauses[0].has_evidence);
    assert_eq!(report.compliance.fulfillment_pct, 100);
}

#[test]
fn refused_deletion_leaves_files_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut store =
        ComplianceStore::open(JsonFilePersistence::new(dir.path()), recorder()).unwrap();
    let mut e = entry("ISO 27001");
    e.status = Some(RegisterStatus::Archived);
    let id = store.create_register_entry(e).unwrap().id.clone();
    store.save().unwrap();

    let err = store.remove_register_entry(&id).unwrap_err();
    match err {
        StoreError::DeletionBlocked { reasons, .. } => {
            assert_eq!(reasons, vec![DeletionBlocker::StatusArchived]);
        }
        other => panic!("expected DeletionBlocked, got {other:?}"),
    }
    assert!(!store.is_dirty());

    let reopened = ComplianceStore::open(JsonFilePersistence::new(dir.path()), recorder()).unwrap();
    assert!(reopened.register_entry(&id).is_some());
}

#[test]
fn allowed_deletion_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut store =
        ComplianceStore::open(JsonFilePersistence::new(dir.path()), recorder()).unwrap();
    let mut e = entry("BDSG");
    e.status = Some(RegisterStatus::Obsolete);
    let id = store.create_register_entry(e).unwrap().id.clone();
    store.remove_register_entry(&id).unwrap();
    store.save().unwrap();

    let reopened = ComplianceStore::open(JsonFilePersistence::new(dir.path()), recorder()).unwrap();
    assert!(reopened.register_entries().is_empty());
}

#[test]
fn legacy_entry_gets_creation_entry_on_first_change() {
    let mut legacy = entry("NIS2");
    legacy.creator_first_name = Some("Alex".into());
    legacy.creator_last_name = Some("Weber".into());
    let created_at = legacy.created_at;
    let id = legacy.id.clone();

    let mut store =
        ComplianceStore::open(MemoryPersistence::with_data(vec![legacy], vec![]), recorder())
            .unwrap();
    assert!(store.register_entry(&id).unwrap().history.is_empty());

    store
        .update_register_entry(
            &id,
            &RegisterPatch {
                title: Some(Some("NIS-2-Umsetzungsgesetz".into())),
                ..Default::default()
            },
        )
        .unwrap();

    let history = &store.register_entry(&id).unwrap().history;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].text, CREATION_TEXT);
    assert_eq!(history[0].actor_label, "Alex Weber");
    assert_eq!(Some(history[0].timestamp), created_at);
    assert_eq!(history[1].actor_label, "Kim Berger (Legal)");
}

fn text_value() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[A-Za-zÄÖÜäöüß0-9 ]{1,12}".prop_map(Some),
    ]
}

fn date_value() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("2026-03-01".to_string())),
        Just(Some("2026-03-01T00:00:00Z".to_string())),
        Just(Some("2027-12-31".to_string())),
        Just(Some("Q3".to_string())),
    ]
}

fn status_value() -> impl Strategy<Value = Option<RegisterStatus>> {
    prop_oneof![
        Just(None),
        Just(Some(RegisterStatus::Open)),
        Just(Some(RegisterStatus::Active)),
        Just(Some(RegisterStatus::Obsolete)),
        Just(Some(RegisterStatus::Archived)),
    ]
}

fn patch() -> impl Strategy<Value = RegisterPatch> {
    (
        proptest::option::of(text_value()),
        proptest::option::of(text_value()),
        proptest::option::of(date_value()),
        proptest::option::of(date_value()),
        proptest::option::of(status_value()),
    )
        .prop_map(|(code, title, valid_from, due_date, status)| RegisterPatch {
            code,
            title,
            valid_from,
            due_date,
            status,
            ..Default::default()
        })
}

type Displayed = (
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<RegisterStatus>,
);

fn displayed(e: &RegisterEntry) -> Displayed {
    (
        e.code.clone(),
        e.title.clone(),
        e.valid_from.clone(),
        e.due_date.clone(),
        e.status,
    )
}

proptest! {
    #[test]
    fn patch_then_inverse_restores_fields_and_history_only_grows(p in patch()) {
        let mut store = ComplianceStore::new(MemoryPersistence::new(), recorder());
        let mut e = entry("Basis");
        e.title = Some("Ausgangstitel".into());
        e.due_date = Some("2026-03-01".into());
        let id = store.create_register_entry(e).unwrap().id.clone();

        let before = store.register_entry(&id).unwrap().clone();
        let inverse = p.inverse(&before);

        store.update_register_entry(&id, &p).unwrap();
        let mid_len = store.register_entry(&id).unwrap().history.len();
        prop_assert!(mid_len >= before.history.len());

        store.update_register_entry(&id, &inverse).unwrap();
        let after = store.register_entry(&id).unwrap();
        prop_assert_eq!(displayed(after), displayed(&before));
        prop_assert!(after.history.len() >= mid_len);
        prop_assert_eq!(&after.history[..before.history.len()], &before.history[..]);
    }
}
