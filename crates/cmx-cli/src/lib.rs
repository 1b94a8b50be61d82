//! # cmx-cli — Command-Line Interface for the Compliance Matrix
//!
//! Provides the `cmx` binary over a JSON data directory.
//!
//! ## Subcommands
//!
//! - `cmx stats` — register status counts and deadline buckets.
//! - `cmx create <entry.json>` — add a register entry.
//! - `cmx report <register-id>` — matrix assessment as JSON.
//! - `cmx history <register-id>` — the audit trail of a register entry.
//! - `cmx patch <register-id> <patch.json>` — save a partial update.
//! - `cmx delete <register-id>` — guarded deletion.
//!
//! ## Exit Codes
//!
//! `0` on success, `1` on any error, `2` when the deletion guard refuses.

pub mod create;
pub mod delete;
pub mod history;
pub mod patch;
pub mod report;
pub mod stats;

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use cmx_store::{CmxConfig, ComplianceStore, JsonFilePersistence};

/// Success.
pub const EXIT_OK: u8 = 0;
/// Operational error.
pub const EXIT_ERROR: u8 = 1;
/// The deletion guard refused.
pub const EXIT_REFUSED: u8 = 2;

/// Store over the configured data directory, loaded.
pub fn open_store(config: &CmxConfig) -> Result<ComplianceStore<JsonFilePersistence>> {
    ComplianceStore::open(JsonFilePersistence::new(&config.data_dir), config.recorder())
        .with_context(|| format!("failed to load data from {}", config.data_dir.display()))
}

/// Read and parse a JSON input file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}
