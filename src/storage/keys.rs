//! Logical storage keys shared with the original local storage layout.

/// JSON object: email -> user profile
pub const REGISTERED_USERS: &str = "registeredUsers";

/// JSON object: email -> password
pub const USER_PASSWORDS: &str = "userPasswords";

/// JSON user profile of the current session; absent when logged out
pub const USER_DATA: &str = "userData";
