//! Error types
//!
//! Defines domain-specific error types for the credential store, the
//! persistence adapters and the portal.

use std::fmt;
use std::io;

/// Credential store validation outcomes. All of these are recoverable by
/// letting the user correct their input and retry.
#[derive(Debug)]
pub enum AuthError {
    MalformedInput(String),
    DuplicateUser(String),
    UserNotFound(String),
    InvalidCredentials(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MalformedInput(s) => write!(f, "Malformed input: {}", s),
            AuthError::DuplicateUser(e) => write!(f, "User already exists: {}", e),
            AuthError::UserNotFound(e) => write!(f, "User not found: {}", e),
            AuthError::InvalidCredentials(e) => write!(f, "Invalid password for user: {}", e),
        }
    }
}

impl std::error::Error for AuthError {}

/// Persistence module errors
#[derive(Debug)]
pub enum StorageError {
    /// Persisted data under `key` could not be parsed or failed validation.
    CorruptState { key: String, reason: String },
    IoError(io::Error),
}

impl StorageError {
    pub fn corrupt(key: &str, reason: impl Into<String>) -> Self {
        StorageError::CorruptState {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::CorruptState { key, reason } => {
                write!(f, "Corrupt state under '{}': {}", key, reason)
            }
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(e) => Some(e),
            StorageError::CorruptState { .. } => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// General error that encompasses all error types
#[derive(Debug)]
pub enum HostifyError {
    Auth(AuthError),
    Storage(StorageError),
    Config(::config::ConfigError),
    IoError(io::Error),
}

impl fmt::Display for HostifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostifyError::Auth(e) => write!(f, "Authentication error: {}", e),
            HostifyError::Storage(e) => write!(f, "Storage error: {}", e),
            HostifyError::Config(e) => write!(f, "Configuration error: {}", e),
            HostifyError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for HostifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostifyError::Auth(e) => Some(e),
            HostifyError::Storage(e) => Some(e),
            HostifyError::Config(e) => Some(e),
            HostifyError::IoError(e) => Some(e),
        }
    }
}

impl HostifyError {
    /// Returns the credential store outcome, if this is one.
    pub fn as_auth(&self) -> Option<&AuthError> {
        match self {
            HostifyError::Auth(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AuthError> for HostifyError {
    fn from(error: AuthError) -> Self {
        HostifyError::Auth(error)
    }
}

impl From<StorageError> for HostifyError {
    fn from(error: StorageError) -> Self {
        HostifyError::Storage(error)
    }
}

impl From<::config::ConfigError> for HostifyError {
    fn from(error: ::config::ConfigError) -> Self {
        HostifyError::Config(error)
    }
}

impl From<io::Error> for HostifyError {
    fn from(error: io::Error) -> Self {
        HostifyError::IoError(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_source_chains_to_wrapped_error() {
        let err = HostifyError::from(StorageError::from(io::Error::other("disk gone")));
        let storage = err.source().unwrap();
        assert!(storage.to_string().starts_with("IO error"));
        assert_eq!(storage.source().unwrap().to_string(), "disk gone");

        let err = HostifyError::from(AuthError::UserNotFound("a@b.co".into()));
        assert_eq!(err.source().unwrap().to_string(), "User not found: a@b.co");
    }
}
