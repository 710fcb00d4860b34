//! Key-value collaborator standing in for browser local storage.
use std::{
    cell::RefCell,
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
    rc::Rc,
};

use log::{debug, info, warn};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Key holding the JSON-encoded teacher record.
pub const TEACHER_DETAILS_KEY: &str = "teacherDetails";
/// Key holding the JSON-encoded slot mapping.
pub const SCHEDULE_SLOTS_KEY: &str = "scheduleSlots";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed storage file: {0}")]
    Json(#[from] serde_json::Error),
}

/// A trait, necessary for every entity the stores persist through.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage. Clones share the same entries, so both stores and a
/// caller can look at one storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Storage backed by one pretty-printed JSON object on disk. Every call
/// re-reads the file, so clones pointing at the same path stay in sync.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            debug!("{} does not exist yet, treating as empty", self.path.display());
            return Ok(BTreeMap::new());
        }
        let file = BufReader::new(File::open(&self.path)?);
        Ok(serde_json::from_reader(file)?)
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        info!("Writing {} key(s) to {}", entries.len(), self.path.display());
        let file = BufWriter::new(File::create(&self.path)?);
        Ok(serde_json::to_writer_pretty(file, entries)?)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_owned(), value);
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Reads and decodes `key`. Absent, unreadable and malformed values all come
/// back as `None`; the reason is only logged.
pub fn read_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("Nothing stored under {}", key);
            return None;
        }
        Err(err) => {
            warn!("Could not read {}: {}", key, err);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("Invalid data stored under {}: {}", key, err);
            None
        }
    }
}

/// Encodes `value` and overwrites `key`. Failures are logged and dropped.
pub fn write_json<T, S>(store: &mut S, key: &str, value: &T)
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let encoded = match serde_json::to_string_pretty(value) {
        Ok(encoded) => encoded,
        Err(err) => {
            warn!("Could not encode {}: {}", key, err);
            return;
        }
    };
    if let Err(err) = store.set(key, encoded) {
        warn!("Could not write {}: {}", key, err);
    }
}

/// Removes `key`, logging instead of failing.
pub fn remove_key<S>(store: &mut S, key: &str)
where
    S: KeyValueStore + ?Sized,
{
    if let Err(err) = store.remove(key) {
        warn!("Could not remove {}: {}", key, err);
    }
}
