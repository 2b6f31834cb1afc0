//! Persistence backends for the inventory record.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::PersistError;

/// Durable storage for the single inventory record.
///
/// Backends move the raw record around; parsing and recovery from bad data
/// belong to [`InventoryStore`](super::InventoryStore).
pub trait InventoryBackend {
    /// Read the stored record, or `None` if nothing has been stored.
    fn load(&self) -> Result<Option<String>, PersistError>;

    /// Replace the stored record.
    fn save(&mut self, record: &str) -> Result<(), PersistError>;

    /// Erase the stored record.
    fn clear(&mut self) -> Result<(), PersistError>;
}

/// Keeps the record in memory; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    record: Option<String>,
}

impl MemoryBackend {
    /// An empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend pre-seeded with a raw record.
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Some(record.into()),
        }
    }

    /// The raw record currently stored.
    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }
}

impl InventoryBackend for MemoryBackend {
    fn load(&self) -> Result<Option<String>, PersistError> {
        Ok(self.record.clone())
    }

    fn save(&mut self, record: &str) -> Result<(), PersistError> {
        self.record = Some(record.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        self.record = None;
        Ok(())
    }
}

/// Stores the record as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Default record key.
    pub const DEFAULT_KEY: &'static str = "inventory";

    /// A backend storing `<dir>/<key>.json`.
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    /// Path of the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InventoryBackend for FileBackend {
    fn load(&self) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, record: &str) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, record)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::InventoryStore;
    use tempfile::TempDir;

    #[test]
    fn memory_backend_roundtrip() {
        let mut backend = MemoryBackend::new();
        assert!(backend.load().unwrap().is_none());
        backend.save(r#"["torch"]"#).unwrap();
        assert_eq!(backend.load().unwrap().as_deref(), Some(r#"["torch"]"#));
        backend.clear().unwrap();
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn file_backend_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path(), "inventory");
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn file_backend_creates_directory() {
        let dir = TempDir::new().unwrap();
        let mut backend = FileBackend::new(dir.path().join("saves"), "player1");
        backend.save("[]").unwrap();
        assert!(dir.path().join("saves/player1.json").exists());
    }

    #[test]
    fn inventory_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let mut store = InventoryStore::open(FileBackend::new(dir.path(), "inventory"));
        store.acquire(["torch"]);
        drop(store);

        let store = InventoryStore::open(FileBackend::new(dir.path(), "inventory"));
        assert_eq!(store.items(), ["torch"]);
    }

    #[test]
    fn corrupted_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("inventory.json"), "torch,rope").unwrap();
        let store = InventoryStore::open(FileBackend::new(dir.path(), "inventory"));
        assert!(store.items().is_empty());
    }

    #[test]
    fn clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let mut store = InventoryStore::open(FileBackend::new(dir.path(), "inventory"));
        store.acquire(["torch"]);
        assert!(store.backend().path().exists());
        store.clear();
        assert!(!store.backend().path().exists());
    }
}
