//! # Patch Subcommand
//!
//! Applies a JSON patch to a register entry. Keys absent from the file are
//! left alone; `null` or `""` clears a field. Changed fields are recorded in
//! the entry's history as one audit entry.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use cmx_core::{AuditEntry, RegisterId, RegisterPatch};
use cmx_store::CmxConfig;

use crate::{open_store, read_json, EXIT_OK};

/// Arguments for the `cmx patch` subcommand.
#[derive(Args, Debug)]
pub struct PatchArgs {
    #[arg(value_name = "REGISTER_ID")]
    pub register_id: String,

    /// JSON object with the fields to change.
    #[arg(value_name = "PATCH_JSON")]
    pub patch: PathBuf,
}

/// Apply the patch and save. Returns the audit entry, if anything changed.
pub fn apply_patch(args: &PatchArgs, config: &CmxConfig) -> Result<Option<AuditEntry>> {
    let patch: RegisterPatch = read_json(&args.patch)?;
    if patch.is_empty() {
        tracing::warn!(path = %args.patch.display(), "patch contains no known fields");
        return Ok(None);
    }
    let mut store = open_store(config)?;
    let id = RegisterId::from_string(args.register_id.as_str());
    let audit = store.update_register_entry(&id, &patch)?;
    store.save()?;
    Ok(audit)
}

/// Execute the patch subcommand.
pub fn run_patch(args: &PatchArgs, config: &CmxConfig) -> Result<u8> {
    match apply_patch(args, config)? {
        Some(audit) => {
            println!("OK: saved register:{}", args.register_id);
            for line in audit.text.lines() {
                println!("  {line}");
            }
        }
        None => println!("OK: no changes"),
    }
    Ok(EXIT_OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmx_core::{RegisterEntry, RegisterStatus};

    fn setup() -> (tempfile::TempDir, CmxConfig) {
        let dir = tempfile::tempdir().unwrap();
        let config = CmxConfig {
            data_dir: dir.path().join("data"),
            actor_label: "Compliance Office".into(),
            ..CmxConfig::default()
        };
        let mut store = open_store(&config).unwrap();
        let mut e = RegisterEntry::with_id(RegisterId::from("nis2"));
        e.code = Some("NIS2".into());
        store.create_register_entry(e).unwrap();
        store.save().unwrap();
        (dir, config)
    }

    #[test]
    fn patch_records_and_persists() {
        let (dir, config) = setup();
        let file = dir.path().join("patch.json");
        std::fs::write(&file, r#"{"status": "active", "dueDate": "2026-10-17"}"#).unwrap();
        let args = PatchArgs {
            register_id: "nis2".into(),
            patch: file,
        };

        let audit = apply_patch(&args, &config).unwrap().unwrap();
        assert_eq!(audit.actor_label, "Compliance Office");
        assert_eq!(
            audit.text,
            "Fälligkeit auf 17.10.2026 gesetzt\nDokumentenstatus auf \"active\" gesetzt"
        );

        let store = open_store(&config).unwrap();
        let e = store.register_entry(&RegisterId::from("nis2")).unwrap();
        assert_eq!(e.status, Some(RegisterStatus::Active));
        assert_eq!(e.history.len(), 2);

        // Same patch again: nothing to record.
        assert!(apply_patch(&args, &config).unwrap().is_none());
    }

    #[test]
    fn unknown_entry_fails() {
        let (dir, config) = setup();
        let file = dir.path().join("patch.json");
        std::fs::write(&file, r#"{"title": "X"}"#).unwrap();
        let args = PatchArgs {
            register_id: "other".into(),
            patch: file,
        };
        assert!(apply_patch(&args, &config).is_err());
    }

    #[test]
    fn invalid_status_value_fails_to_parse() {
        let (dir, config) = setup();
        let file = dir.path().join("patch.json");
        std::fs::write(&file, r#"{"status": "Active"}"#).unwrap();
        let args = PatchArgs {
            register_id: "nis2".into(),
            patch: file,
        };
        assert!(apply_patch(&args, &config).is_err());
    }
}
