//! # History Subcommand

use anyhow::{Context, Result};
use clap::Args;

use cmx_core::{AuditEntry, RegisterId};
use cmx_store::CmxConfig;

use crate::{open_store, EXIT_OK};

/// Arguments for the `cmx history` subcommand.
#[derive(Args, Debug)]
pub struct HistoryArgs {
    #[arg(value_name = "REGISTER_ID")]
    pub register_id: String,
}

/// Render an audit trail, oldest first. Continuation lines of a multi-field
/// entry are indented under its header.
pub fn render(history: &[AuditEntry]) -> String {
    let mut out = String::new();
    for entry in history {
        out.push_str(&format!("{}  {}\n", entry.timestamp, entry.actor_label));
        for line in entry.text.lines() {
            out.push_str("    ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Execute the history subcommand.
pub fn run_history(args: &HistoryArgs, config: &CmxConfig) -> Result<u8> {
    let store = open_store(config)?;
    let id = RegisterId::from_string(args.register_id.as_str());
    let entry = store
        .register_entry(&id)
        .with_context(|| format!("unknown register entry {id}"))?;
    if entry.history.is_empty() {
        println!("No history recorded.");
    } else {
        print!("{}", render(&entry.history));
    }
    Ok(EXIT_OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmx_core::Timestamp;

    #[test]
    fn render_indents_each_change() {
        let history = vec![
            AuditEntry {
                timestamp: Timestamp::parse("2026-01-05T09:00:00Z").unwrap(),
                actor_label: "Administrator".into(),
                text: "Dokument angelegt".into(),
            },
            AuditEntry {
                timestamp: Timestamp::parse("2026-01-06T10:30:00Z").unwrap(),
                actor_label: "Kim Berger".into(),
                text: "Titel von \"A\" auf \"B\" geändert\nDokumentenstatus entfernt".into(),
            },
        ];
        assert_eq!(
            render(&history),
            "2026-01-05T09:00:00Z  Administrator\n    Dokument angelegt\n\
             2026-01-06T10:30:00Z  Kim Berger\n\
             \x20   Titel von \"A\" auf \"B\" geändert\n\
             \x20   Dokumentenstatus entfernt\n"
        );
    }
}
