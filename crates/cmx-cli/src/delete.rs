//! # Delete Subcommand
//!
//! Runs the deletion guard. If any reason applies, the reasons are printed
//! and the exit code is 2; nothing is written.

use anyhow::Result;
use clap::Args;

use cmx_core::RegisterId;
use cmx_engine::DeletionCheck;
use cmx_store::CmxConfig;

use crate::{open_store, EXIT_OK, EXIT_REFUSED};

/// Arguments for the `cmx delete` subcommand.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[arg(value_name = "REGISTER_ID")]
    pub register_id: String,

    /// Only run the guard; do not delete.
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the guard and, if allowed and not a dry run, delete and save.
pub fn delete_entry(args: &DeleteArgs, config: &CmxConfig) -> Result<DeletionCheck> {
    let mut store = open_store(config)?;
    let id = RegisterId::from_string(args.register_id.as_str());
    let check = store.check_deletion(&id)?;
    if check.is_allowed() && !args.dry_run {
        store.remove_register_entry(&id)?;
        store.save()?;
    }
    Ok(check)
}

/// Execute the delete subcommand.
pub fn run_delete(args: &DeleteArgs, config: &CmxConfig) -> Result<u8> {
    let check = delete_entry(args, config)?;
    if !check.is_allowed() {
        println!("REFUSED: register:{} cannot be deleted", args.register_id);
        for reason in check.messages() {
            println!("  - {reason}");
        }
        return Ok(EXIT_REFUSED);
    }
    if args.dry_run {
        println!("OK: register:{} can be deleted", args.register_id);
    } else {
        println!("OK: deleted register:{}", args.register_id);
    }
    Ok(EXIT_OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmx_core::{RegisterEntry, RegisterStatus};
    use cmx_engine::DeletionBlocker;

    fn config_with(
        status: Option<RegisterStatus>,
        with_matrix: bool,
    ) -> (tempfile::TempDir, CmxConfig) {
        let dir = tempfile::tempdir().unwrap();
        let config = CmxConfig {
            data_dir: dir.path().to_path_buf(),
            ..CmxConfig::default()
        };
        let mut store = open_store(&config).unwrap();
        let mut e = RegisterEntry::with_id(RegisterId::from("e1"));
        e.title = Some("KRITIS-Verordnung".into());
        e.status = status;
        store.create_register_entry(e).unwrap();
        if with_matrix {
            store.get_or_create_matrix(&RegisterId::from("e1")).unwrap();
        }
        store.save().unwrap();
        (dir, config)
    }

    fn args(dry_run: bool) -> DeleteArgs {
        DeleteArgs {
            register_id: "e1".into(),
            dry_run,
        }
    }

    #[test]
    fn refused_returns_exit_two_and_keeps_entry() {
        let (_dir, config) = config_with(Some(RegisterStatus::Active), true);
        assert_eq!(run_delete(&args(false), &config).unwrap(), EXIT_REFUSED);

        let check = delete_entry(&args(false), &config).unwrap();
        assert!(check.contains(DeletionBlocker::ReferencedByMatrix));
        assert!(check.contains(DeletionBlocker::StatusActive));
        assert!(open_store(&config)
            .unwrap()
            .register_entry(&RegisterId::from("e1"))
            .is_some());
    }

    #[test]
    fn dry_run_keeps_deletable_entry() {
        let (_dir, config) = config_with(Some(RegisterStatus::Open), false);
        assert_eq!(run_delete(&args(true), &config).unwrap(), EXIT_OK);
        assert_eq!(open_store(&config).unwrap().register_entries().len(), 1);
    }

    #[test]
    fn allowed_deletion_is_saved() {
        let (_dir, config) = config_with(None, false);
        assert_eq!(run_delete(&args(false), &config).unwrap(), EXIT_OK);
        assert!(open_store(&config).unwrap().register_entries().is_empty());
    }
}
