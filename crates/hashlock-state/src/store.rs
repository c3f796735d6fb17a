//! # Keyed Store Collaborator
//!
//! The [`ProposalStore`] trait is the state machine's view of durable
//! storage: get/put/delete over opaque bytes by string key. The machine
//! issues a read-then-write sequence per operation and holds no locks of
//! its own — atomicity of the per-key read-modify-write and conflict
//! handling between racing writers are the store's obligation.
//!
//! Two reference implementations are provided: [`MemoryStore`] for
//! embedding and tests, and [`FileStore`] for the CLI and demos.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

/// Failure reported by a store implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying I/O failed.
    #[error("store i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document could not be encoded or decoded.
    #[error("store codec failure: {0}")]
    Codec(String),

    /// The store's internal lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Durable keyed storage as seen by the state machine.
///
/// `delete` of an absent key is a no-op — the machine checks existence
/// itself where the protocol requires it.
pub trait ProposalStore {
    /// Read the bytes stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Remove the value under `key`, if present.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

// ─── MemoryStore ─────────────────────────────────────────────────────

/// In-memory store: a mutex-guarded map.
///
/// Suitable for tests and for embedding a ledger inside a single process.
/// The mutex serializes racing operations on all keys, which satisfies
/// the per-key atomicity obligation trivially.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProposalStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

// ─── FileStore ───────────────────────────────────────────────────────

/// File-backed store: one JSON document holding every key.
///
/// Each operation loads the document, applies the change, and writes the
/// whole document back. Values must be UTF-8 (proposal entries are JSON
/// text). Keys serialize sorted, so the on-disk document is stable across
/// rewrites.
///
/// This is a single-process convenience store for the CLI and demos; it
/// makes no attempt at cross-process locking.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the JSON document at `path`. The file is
    /// created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&text).map_err(|e| StoreError::Codec(e.to_string()))
    }

    fn save(&self, document: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let text =
            serde_json::to_string_pretty(document).map_err(|e| StoreError::Codec(e.to_string()))?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

impl ProposalStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.load()?.get(key).map(|v| v.as_bytes().to_vec()))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let text = std::str::from_utf8(value)
            .map_err(|e| StoreError::Codec(format!("value is not utf-8: {e}")))?;
        let mut document = self.load()?;
        document.insert(key.to_string(), text.to_string());
        self.save(&document)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut document = self.load()?;
        if document.remove(key).is_some() {
            self.save(&document)?;
        }
        Ok(())
    }
}
