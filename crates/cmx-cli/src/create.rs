//! # Create Subcommand
//!
//! Adds a register entry. The input file holds the descriptive fields in the
//! same shape as a patch; the id and creation time are generated.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use cmx_core::{RegisterEntry, RegisterId, RegisterPatch};
use cmx_store::CmxConfig;

use crate::{open_store, read_json, EXIT_OK};

/// Arguments for the `cmx create` subcommand.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// JSON file with the entry's fields (`type`, `code`, `title`, ...).
    #[arg(value_name = "ENTRY_JSON")]
    pub entry: PathBuf,

    /// Use this id instead of generating one.
    #[arg(long)]
    pub id: Option<String>,

    #[arg(long)]
    pub creator_first_name: Option<String>,

    #[arg(long)]
    pub creator_last_name: Option<String>,

    #[arg(long)]
    pub creator_department: Option<String>,
}

/// Create the entry and save. Returns the new id.
pub fn create_entry(args: &CreateArgs, config: &CmxConfig) -> Result<RegisterId> {
    let fields: RegisterPatch = read_json(&args.entry)?;

    let mut entry = match &args.id {
        Some(id) => RegisterEntry::with_id(RegisterId::from_string(id.as_str())),
        None => RegisterEntry::new(),
    };
    fields.apply_to(&mut entry);
    entry.creator_first_name = args.creator_first_name.clone();
    entry.creator_last_name = args.creator_last_name.clone();
    entry.creator_department = args.creator_department.clone();

    let mut store = open_store(config)?;
    let id = store.create_register_entry(entry)?.id.clone();
    store.save()?;
    Ok(id)
}

/// Execute the create subcommand.
pub fn run_create(args: &CreateArgs, config: &CmxConfig) -> Result<u8> {
    let id = create_entry(args, config)?;
    println!("OK: created {id}");
    Ok(EXIT_OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmx_audit::CREATION_TEXT;

    #[test]
    fn creates_with_creator_and_history() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("entry.json");
        std::fs::write(&input, r#"{"type": "Law", "code": "BDSG"}"#).unwrap();
        let config = CmxConfig {
            data_dir: dir.path().join("data"),
            ..CmxConfig::default()
        };
        let args = CreateArgs {
            entry: input,
            id: Some("bdsg".into()),
            creator_first_name: Some("Kim".into()),
            creator_last_name: None,
            creator_department: Some("Legal".into()),
        };

        let id = create_entry(&args, &config).unwrap();
        assert_eq!(id.as_str(), "bdsg");

        let store = open_store(&config).unwrap();
        let e = store.register_entry(&id).unwrap();
        assert_eq!(e.code.as_deref(), Some("BDSG"));
        assert_eq!(e.history[0].text, CREATION_TEXT);
        assert_eq!(e.history[0].actor_label, "Kim (Legal)");
    }

    #[test]
    fn empty_entry_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("entry.json");
        std::fs::write(&input, r#"{"title": ""}"#).unwrap();
        let config = CmxConfig {
            data_dir: dir.path().join("data"),
            ..CmxConfig::default()
        };
        let args = CreateArgs {
            entry: input,
            id: None,
            creator_first_name: None,
            creator_last_name: None,
            creator_department: None,
        };
        let err = create_entry(&args, &config).unwrap_err();
        assert!(err.to_string().contains("is empty"));
    }
}
