//! Key-value persistence behind the engine.
//!
//! The persisted layout is a handful of logical keys, each holding one JSON
//! document. The engine writes the affected key after every in-memory
//! mutation; writes are best-effort and synchronous, not transactional.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// The persisted key names, shared between the engine and any tooling that
/// inspects the store directly.
pub mod keys {
    pub const TRIPS: &str = "transport_trips";
    pub const STAFF: &str = "transport_staff";
    pub const VEHICLES: &str = "transport_vehicles";
    pub const PAYMENTS: &str = "transport_payments";
    pub const RATES: &str = "transport_rates";
    pub const LOGO: &str = "transport_logo";
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A place that keeps one JSON string per key.
///
/// Implementations do not interpret values; (de)serialization stays with the
/// engine so the stored layout is defined in exactly one place.
pub trait StateStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store, used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed store: one `<key>.json` file per key.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
