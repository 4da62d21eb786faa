//! Local storage abstraction
//!
//! The credential store never touches a concrete storage area directly. It is
//! handed a [`PersistencePort`], which behaves like a browser's local storage:
//! string keys mapped to string values (usually JSON blobs).

pub mod filesystem;
pub mod keys;
pub mod memory;

use crate::error::StorageError;

pub use filesystem::FileStorage;
pub use memory::MemoryStorage;

/// Key-value persistence substrate.
pub trait PersistencePort {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Stores several values so that a reader observes either all of them or
    /// none of them.
    ///
    /// The default writes one key at a time, which is only all-or-nothing for
    /// adapters whose `set` cannot fail. Adapters backed by fallible media
    /// override it.
    fn set_many(&mut self, entries: Vec<(&str, String)>) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}
