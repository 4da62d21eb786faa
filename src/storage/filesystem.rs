//! File-backed storage area
//!
//! Keeps the whole storage area as a single JSON object of string values, the
//! same shape a browser keeps for a profile's local storage. Every mutation
//! rewrites the document to a temporary sibling file and renames it over the
//! original, so the file on disk is always either the old or the new document.

use log::{debug, error, info};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use super::PersistencePort;
use crate::error::StorageError;

const RENAME_RETRIES: u64 = 3;

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens the storage file at `path`, starting empty if it does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str::<BTreeMap<String, String>>(&contents)
                .map_err(|e| StorageError::corrupt(&path.display().to_string(), e.to_string()))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No storage file at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                error!("Failed to read storage file {}: {}", path.display(), e);
                return Err(StorageError::from(e));
            }
        };

        debug!("Opened {} with {} keys", path.display(), entries.len());

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `mutate` to a copy of the entries, persists the copy, and only
    /// then swaps it in. A failed write leaves both the file and the cache
    /// untouched.
    fn commit<F>(&mut self, mutate: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut next = self.entries.clone();
        mutate(&mut next);
        write_document(&self.path, &next)?;
        self.entries = next;
        Ok(())
    }
}

impl PersistencePort for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.commit(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        self.commit(|entries| {
            entries.remove(key);
        })
    }

    fn set_many(&mut self, batch: Vec<(&str, String)>) -> Result<(), StorageError> {
        self.commit(|entries| {
            for (key, value) in batch {
                entries.insert(key.to_string(), value);
            }
        })
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    path.with_extension(format!(
        "{}.tmp",
        path.extension().and_then(|ext| ext.to_str()).unwrap_or("")
    ))
}

fn write_document(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
    let document = serde_json::to_string_pretty(entries).map_err(io::Error::from)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_path_for(path);
    fs::write(&temp_path, document)?;

    // Rename with retries for permission issues. Blocks the calling thread,
    // which is the portal's runtime thread when driven from `portal::run`.
    for attempt in 1..=RENAME_RETRIES {
        match fs::rename(&temp_path, path) {
            Ok(()) => {
                debug!("Wrote {} keys to {}", entries.len(), path.display());
                return Ok(());
            }
            Err(e) => {
                if attempt < RENAME_RETRIES && e.kind() == io::ErrorKind::PermissionDenied {
                    thread::sleep(Duration::from_millis(100 * attempt));
                    continue;
                }
                error!(
                    "Failed to move {} into place at {}: {}",
                    temp_path.display(),
                    path.display(),
                    e
                );
                let _ = fs::remove_file(&temp_path);
                return Err(StorageError::from(e));
            }
        }
    }

    Err(StorageError::IoError(io::Error::other(
        "Failed to write storage file after retries",
    )))
}
