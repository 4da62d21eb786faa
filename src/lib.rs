pub mod auth;
pub mod config;
pub mod error;
pub mod portal;
pub mod storage;

pub use auth::{CredentialStore, RegistrationForm, RegistrationInput, UserProfile};
pub use crate::config::{AuthPolicy, HostifyConfig};
pub use error::{AuthError, HostifyError, StorageError};
pub use storage::{FileStorage, MemoryStorage, PersistencePort};
