//! Error handlers
//!
//! Translates errors into notices for the user and logs the ones the user
//! cannot fix by retrying.

use crate::error::types::{AuthError, HostifyError};
use log::error;

/// Log an error that is not a plain validation outcome
pub fn handle_error(err: &HostifyError) {
    if err.as_auth().is_none() {
        error!("Hostify error: {}", err);
    }
}

/// Convert error to the message shown to the user
pub fn user_notice(err: &HostifyError) -> String {
    match err {
        HostifyError::Auth(AuthError::MalformedInput(msg)) => msg.clone(),
        HostifyError::Auth(AuthError::DuplicateUser(_)) => {
            "User with this email already exists".to_string()
        }
        HostifyError::Auth(AuthError::UserNotFound(_)) => "User not found".to_string(),
        HostifyError::Auth(AuthError::InvalidCredentials(_)) => "Invalid password".to_string(),
        HostifyError::Storage(_) | HostifyError::Config(_) | HostifyError::IoError(_) => {
            "Something went wrong, please try again".to_string()
        }
    }
}
