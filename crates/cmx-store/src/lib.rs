//! # cmx-store — Document/Clause Store
//!
//! The orchestration layer of the workspace:
//!
//! - **Store** (`store.rs`): [`ComplianceStore`], an explicit object with
//!   `load()` / `save()` that owns the register and matrix collections,
//!   records history on register saves and consults the deletion guard on
//!   register removal.
//!
//! - **Persistence** (`persistence.rs`): the load-all / save-all collaborator
//!   trait, with in-memory and JSON-file implementations.
//!
//! - **Config** (`config.rs`): [`CmxConfig`], loaded from YAML and `CMX_*`
//!   environment variables.
//!
//! - **Error** (`error.rs`): [`StoreError`] and [`PersistenceError`].
//!
//! ## Concurrency
//!
//! None. One caller owns the store; every mutation takes `&mut self`.

pub mod config;
pub mod error;
pub mod persistence;
pub mod store;

pub use config::{CmxConfig, ConfigError};
pub use error::{PersistenceError, StoreError};
pub use persistence::{
    JsonFilePersistence, MemoryPersistence, Persistence, MATRIX_FILE, REGISTER_FILE,
};
pub use store::{ComplianceStore, RegisterOverview};
