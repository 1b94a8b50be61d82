//! # Report Subcommand
//!
//! Prints the assessment of a register entry's compliance matrix as JSON:
//! compliance counts, maturity and risk roll-ups, and the clauses in display
//! order with their evidence flags.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use cmx_core::{ClauseId, RegisterId};
use cmx_engine::DocumentAssessment;
use cmx_store::CmxConfig;

use crate::{open_store, read_json, EXIT_OK};

/// Arguments for the `cmx report` subcommand.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Register entry whose matrix is assessed.
    #[arg(value_name = "REGISTER_ID")]
    pub register_id: String,

    /// JSON object mapping clause ids to attachment counts.
    #[arg(long)]
    pub attachments: Option<PathBuf>,
}

/// Build the assessment.
pub fn assessment(args: &ReportArgs, config: &CmxConfig) -> Result<DocumentAssessment> {
    let attachments: HashMap<ClauseId, usize> = match &args.attachments {
        Some(path) => read_json(path)?,
        None => HashMap::new(),
    };
    let store = open_store(config)?;
    let id = RegisterId::from_string(args.register_id.as_str());
    Ok(store.assess_entry(&id, &attachments)?)
}

/// Execute the report subcommand.
pub fn run_report(args: &ReportArgs, config: &CmxConfig) -> Result<u8> {
    let report = assessment(args, config)?;
    if report.deficient_count > 0 {
        tracing::warn!(
            document = %report.document_id,
            deficient = report.deficient_count,
            "compliant clauses without evidence"
        );
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(EXIT_OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmx_core::{ComplianceStatus, RegisterEntry};

    #[test]
    fn report_joins_attachment_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = CmxConfig {
            data_dir: dir.path().join("data"),
            ..CmxConfig::default()
        };
        let mut store = open_store(&config).unwrap();
        let mut e = RegisterEntry::with_id(RegisterId::from("iso"));
        e.code = Some("ISO 27001".into());
        store.create_register_entry(e).unwrap();
        let doc = store
            .get_or_create_matrix(&RegisterId::from("iso"))
            .unwrap()
            .id
            .clone();
        let clause = store.add_clause(&doc).unwrap();
        store
            .update_clause(&doc, &clause, |c| {
                c.compliance_status = ComplianceStatus::Compliant;
            })
            .unwrap();
        store.save().unwrap();

        let mut args = ReportArgs {
            register_id: "iso".into(),
            attachments: None,
        };
        assert_eq!(assessment(&args, &config).unwrap().deficient_count, 1);

        let files = dir.path().join("attachments.json");
        std::fs::write(&files, format!(r#"{{"{}": 2}}"#, clause.as_str())).unwrap();
        args.attachments = Some(files);
        let report = assessment(&args, &config).unwrap();
        assert_eq!(report.deficient_count, 0);
        assert_eq!(report.clauses[0].attachment_count, 2);
    }

    #[test]
    fn unknown_entry_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = CmxConfig {
            data_dir: dir.path().to_path_buf(),
            ..CmxConfig::default()
        };
        let args = ReportArgs {
            register_id: "missing".into(),
            attachments: None,
        };
        assert!(assessment(&args, &config).is_err());
    }
}
