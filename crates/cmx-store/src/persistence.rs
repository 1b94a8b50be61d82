//! # Persistence Collaborators
//!
//! The store reads and writes whole collections: every register entry at
//! once, every matrix document at once. There is no per-record access and
//! no locking. The last writer wins.
//!
//! - [`MemoryPersistence`] keeps the collections in memory, for tests and
//!   embedding.
//! - [`JsonFilePersistence`] keeps `register.json` and `matrix.json` in a
//!   data directory. A missing file loads as an empty collection.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use cmx_core::{MatrixDocument, RegisterEntry};

use crate::error::PersistenceError;

/// File name of the register collection.
pub const REGISTER_FILE: &str = "register.json";
/// File name of the matrix collection.
pub const MATRIX_FILE: &str = "matrix.json";

/// Load-all / save-all access to the stored collections.
pub trait Persistence {
    fn load_register(&self) -> Result<Vec<RegisterEntry>, PersistenceError>;
    fn save_register(&mut self, entries: &[RegisterEntry]) -> Result<(), PersistenceError>;
    fn load_matrix(&self) -> Result<Vec<MatrixDocument>, PersistenceError>;
    fn save_matrix(&mut self, documents: &[MatrixDocument]) -> Result<(), PersistenceError>;
}

// -- In-memory ----------------------------------------------------------------

/// Collections held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    register: Vec<RegisterEntry>,
    matrix: Vec<MatrixDocument>,
    saves: usize,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the collections a subsequent load will return.
    pub fn with_data(register: Vec<RegisterEntry>, matrix: Vec<MatrixDocument>) -> Self {
        Self {
            register,
            matrix,
            saves: 0,
        }
    }

    pub fn register(&self) -> &[RegisterEntry] {
        &self.register
    }

    pub fn matrix(&self) -> &[MatrixDocument] {
        &self.matrix
    }

    /// Number of collection writes so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl Persistence for MemoryPersistence {
    fn load_register(&self) -> Result<Vec<RegisterEntry>, PersistenceError> {
        Ok(self.register.clone())
    }

    fn save_register(&mut self, entries: &[RegisterEntry]) -> Result<(), PersistenceError> {
        self.register = entries.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn load_matrix(&self) -> Result<Vec<MatrixDocument>, PersistenceError> {
        Ok(self.matrix.clone())
    }

    fn save_matrix(&mut self, documents: &[MatrixDocument]) -> Result<(), PersistenceError> {
        self.matrix = documents.to_vec();
        self.saves += 1;
        Ok(())
    }
}

// -- JSON files ---------------------------------------------------------------

/// Collections stored as pretty-printed JSON arrays in a data directory.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    data_dir: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn register_path(&self) -> PathBuf {
        self.data_dir.join(REGISTER_FILE)
    }

    pub fn matrix_path(&self) -> PathBuf {
        self.data_dir.join(MATRIX_FILE)
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, PersistenceError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "data file missing, loading empty collection");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(PersistenceError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let records: Vec<T> = serde_json::from_slice(&bytes).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), records = records.len(), "loaded collection");
    Ok(records)
}

/// Write via a sibling temp file and rename, so a failed write leaves the
/// previous file intact.
fn write_collection<T: Serialize>(path: &Path, records: &[T]) -> Result<(), PersistenceError> {
    let io_err = |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(io_err)?;
    }
    let json = serde_json::to_vec_pretty(records).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)?;
    tracing::debug!(path = %path.display(), records = records.len(), "saved collection");
    Ok(())
}

impl Persistence for JsonFilePersistence {
    fn load_register(&self) -> Result<Vec<RegisterEntry>, PersistenceError> {
        read_collection(&self.register_path())
    }

    fn save_register(&mut self, entries: &[RegisterEntry]) -> Result<(), PersistenceError> {
        write_collection(&self.register_path(), entries)
    }

    fn load_matrix(&self) -> Result<Vec<MatrixDocument>, PersistenceError> {
        read_collection(&self.matrix_path())
    }

    fn save_matrix(&mut self, documents: &[MatrixDocument]) -> Result<(), PersistenceError> {
        write_collection(&self.matrix_path(), documents)
    }
}
