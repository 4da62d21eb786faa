//! User and password directories
//!
//! Both directories are JSON objects keyed by email. They are loaded and
//! checked together so that a profile without a password (or the reverse)
//! surfaces as `CorruptState` instead of a confusing login failure.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

use super::profile::{CredentialEntry, UserProfile};
use crate::error::StorageError;
use crate::storage::PersistencePort;
use crate::storage::keys::{REGISTERED_USERS, USER_PASSWORDS};

/// Reads and decodes the JSON value under `key`.
pub(crate) fn read_json<T, P>(port: &P, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    P: PersistencePort + ?Sized,
{
    match port.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::corrupt(key, e.to_string())),
        None => Ok(None),
    }
}

pub(crate) fn encode_json<T: Serialize>(key: &str, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|e| StorageError::corrupt(key, e.to_string()))
}

/// email -> profile
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserDirectory {
    profiles: BTreeMap<String, UserProfile>,
}

impl UserDirectory {
    pub fn load<P: PersistencePort + ?Sized>(port: &P) -> Result<Self, StorageError> {
        let profiles: BTreeMap<String, UserProfile> =
            read_json(port, REGISTERED_USERS)?.unwrap_or_default();

        for (email, profile) in &profiles {
            if email != profile.email() {
                return Err(StorageError::corrupt(
                    REGISTERED_USERS,
                    format!("entry '{}' holds profile for '{}'", email, profile.email()),
                ));
            }
            profile
                .check()
                .map_err(|reason| StorageError::corrupt(REGISTERED_USERS, reason))?;
        }

        Ok(Self { profiles })
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        encode_json(REGISTERED_USERS, &self.profiles)
    }

    pub fn contains(&self, email: &str) -> bool {
        self.profiles.contains_key(email)
    }

    pub fn get(&self, email: &str) -> Option<&UserProfile> {
        self.profiles.get(email)
    }

    pub fn insert(&mut self, profile: UserProfile) {
        self.profiles.insert(profile.email().to_string(), profile);
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn emails(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

/// email -> plaintext password
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PasswordDirectory {
    passwords: BTreeMap<String, String>,
}

impl PasswordDirectory {
    pub fn load<P: PersistencePort + ?Sized>(port: &P) -> Result<Self, StorageError> {
        let passwords = read_json(port, USER_PASSWORDS)?.unwrap_or_default();
        Ok(Self { passwords })
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        encode_json(USER_PASSWORDS, &self.passwords)
    }

    pub fn credential(&self, email: &str) -> Option<CredentialEntry> {
        self.passwords.get(email).map(|password| CredentialEntry {
            email: email.to_string(),
            password: password.clone(),
        })
    }

    pub fn insert(&mut self, entry: CredentialEntry) {
        self.passwords.insert(entry.email, entry.password);
    }

    pub fn contains(&self, email: &str) -> bool {
        self.passwords.contains_key(email)
    }

    pub fn len(&self) -> usize {
        self.passwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty()
    }
}

/// Loads both directories and verifies they cover the same emails.
pub fn load_directories<P: PersistencePort + ?Sized>(
    port: &P,
) -> Result<(UserDirectory, PasswordDirectory), StorageError> {
    let users = UserDirectory::load(port)?;
    let passwords = PasswordDirectory::load(port)?;

    if let Some(email) = users.emails().find(|email| !passwords.contains(email)) {
        return Err(StorageError::corrupt(
            USER_PASSWORDS,
            format!("no password stored for '{}'", email),
        ));
    }

    if users.len() != passwords.len() {
        return Err(StorageError::corrupt(
            REGISTERED_USERS,
            "password stored for an unregistered email",
        ));
    }

    Ok((users, passwords))
}
