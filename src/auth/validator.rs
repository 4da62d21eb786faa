//! Input validator
//!
//! Checks registration and login input before the credential store touches
//! storage. Every failure is an `AuthError::MalformedInput` carrying the
//! message the form shows next to the field.

use super::profile::RegistrationInput;
use crate::config::AuthPolicy;
use crate::error::AuthError;

fn has_forbidden_chars(input: &str) -> bool {
    input.contains(['\r', '\n', '\0'])
}

/// Rejects blank, oversized or control-character-laden fields.
fn check_field(label: &str, value: &str, max_length: usize) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::MalformedInput(format!("{} is required", label)));
    }
    if value.chars().count() > max_length {
        return Err(AuthError::MalformedInput(format!("{} is too long", label)));
    }
    if has_forbidden_chars(value) {
        return Err(AuthError::MalformedInput(format!(
            "{} contains invalid characters",
            label
        )));
    }
    Ok(())
}

/// Passwords are opaque: any characters count, including whitespace.
fn check_password(password: &str, max_length: usize) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::MalformedInput("Password is required".into()));
    }
    if password.chars().count() > max_length {
        return Err(AuthError::MalformedInput("Password is too long".into()));
    }
    Ok(())
}

/// Syntactic email check: one `@`, a non-empty local part, and a dotted
/// domain with no empty labels. No whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// Validates a registration request against the configured policy.
pub fn validate_registration(
    input: &RegistrationInput,
    policy: &AuthPolicy,
) -> Result<(), AuthError> {
    check_field("Name", &input.name, policy.max_field_length)?;
    if input.name.trim().chars().count() < policy.min_name_length {
        return Err(AuthError::MalformedInput(format!(
            "Name must be at least {} characters",
            policy.min_name_length
        )));
    }

    check_field("Email", &input.email, policy.max_field_length)?;
    if !is_valid_email(&input.email) {
        return Err(AuthError::MalformedInput("Invalid email address".into()));
    }

    check_password(&input.password, policy.max_field_length)?;
    if input.password.chars().count() < policy.min_password_length {
        return Err(AuthError::MalformedInput(format!(
            "Password must be at least {} characters",
            policy.min_password_length
        )));
    }

    check_field("Student ID", &input.student_id, policy.max_field_length)?;

    Ok(())
}

/// Validates login input. The email gets the usual shape checks; the
/// password only has to be present, so a wrong one reaches the lookup.
pub fn validate_login(email: &str, password: &str, policy: &AuthPolicy) -> Result<(), AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::MalformedInput(
            "Please enter both email and password".into(),
        ));
    }
    check_field("Email", email, policy.max_field_length)?;
    Ok(())
}
