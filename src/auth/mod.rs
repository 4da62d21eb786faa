//! Authentication system
//!
//! Handles user registration, credential verification and the current
//! session record.

pub mod credentials;
pub mod directory;
pub mod profile;
pub mod validator;

pub use credentials::CredentialStore;
pub use directory::{PasswordDirectory, UserDirectory, load_directories};
pub use profile::{CredentialEntry, RegistrationForm, RegistrationInput, UserProfile};
pub use validator::{is_valid_email, validate_login, validate_registration};
