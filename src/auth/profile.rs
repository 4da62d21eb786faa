//! Typed user records
//!
//! Profiles are stored without passwords. Passwords live in their own
//! directory, keyed by the same email.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validator::is_valid_email;
use crate::error::AuthError;

/// Public profile of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    name: String,
    email: String,
    student_id: String,
    created_at: DateTime<Utc>,
}

impl UserProfile {
    pub(crate) fn new(
        name: String,
        email: String,
        student_id: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name,
            email,
            student_id,
            created_at,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Structural check applied to profiles read back from storage.
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err(format!("profile '{}' has an empty name", self.email));
        }
        if !is_valid_email(&self.email) {
            return Err(format!("profile email '{}' is not a valid address", self.email));
        }
        if self.student_id.trim().is_empty() {
            return Err(format!("profile '{}' has an empty student id", self.email));
        }
        Ok(())
    }
}

/// Stored password for one email. Compared by plain string equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialEntry {
    pub email: String,
    pub password: String,
}

impl CredentialEntry {
    pub fn matches(&self, password: &str) -> bool {
        self.password == password
    }
}

/// Registration request as the credential store consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub student_id: String,
}

/// Registration form as submitted, including the confirmation field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub student_id: String,
}

impl RegistrationForm {
    /// Drops the confirmation field once it matches the password.
    pub fn into_input(self) -> Result<RegistrationInput, AuthError> {
        if self.confirm_password.is_empty() {
            return Err(AuthError::MalformedInput(
                "Please confirm your password".into(),
            ));
        }
        if self.password != self.confirm_password {
            return Err(AuthError::MalformedInput("Passwords do not match".into()));
        }
        Ok(RegistrationInput {
            name: self.name,
            email: self.email,
            password: self.password,
            student_id: self.student_id,
        })
    }
}
