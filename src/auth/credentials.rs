//! Credential store
//!
//! Registers and verifies users against an injected [`PersistencePort`].
//! Every operation is a synchronous read-modify-write of the storage area;
//! failures are returned to the caller and never logged here.

use chrono::Utc;

use super::directory::{UserDirectory, encode_json, load_directories, read_json};
use super::profile::{CredentialEntry, RegistrationForm, RegistrationInput, UserProfile};
use super::validator::{validate_login, validate_registration};
use crate::config::AuthPolicy;
use crate::error::{AuthError, HostifyError, StorageError};
use crate::storage::PersistencePort;
use crate::storage::keys::{REGISTERED_USERS, USER_DATA, USER_PASSWORDS};

pub struct CredentialStore<P: PersistencePort> {
    port: P,
    policy: AuthPolicy,
}

impl<P: PersistencePort> CredentialStore<P> {
    pub fn new(port: P, policy: AuthPolicy) -> Self {
        Self { port, policy }
    }

    pub fn policy(&self) -> &AuthPolicy {
        &self.policy
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Creates a new account.
    ///
    /// Both directories (and the session record, when the policy logs new
    /// users in) are written in a single batch, so storage never holds a
    /// profile without its password.
    pub fn register(&mut self, input: RegistrationInput) -> Result<UserProfile, HostifyError> {
        validate_registration(&input, &self.policy)?;

        let (mut users, mut passwords) = load_directories(&self.port)?;
        if users.contains(&input.email) {
            return Err(AuthError::DuplicateUser(input.email).into());
        }

        let profile = UserProfile::new(input.name, input.email, input.student_id, Utc::now());
        users.insert(profile.clone());
        passwords.insert(CredentialEntry {
            email: profile.email().to_string(),
            password: input.password,
        });

        let mut batch = vec![
            (REGISTERED_USERS, users.to_json()?),
            (USER_PASSWORDS, passwords.to_json()?),
        ];
        if self.policy.auto_login_on_register {
            batch.push((USER_DATA, encode_json(USER_DATA, &profile)?));
        }
        self.port.set_many(batch)?;

        Ok(profile)
    }

    /// Registers from a submitted form, checking the password confirmation first.
    pub fn register_form(&mut self, form: RegistrationForm) -> Result<UserProfile, HostifyError> {
        let input = form.into_input()?;
        self.register(input)
    }

    /// Verifies `email`/`password` and makes the matched profile the current session.
    pub fn login(&mut self, email: &str, password: &str) -> Result<UserProfile, HostifyError> {
        validate_login(email, password, &self.policy)?;

        let (users, passwords) = load_directories(&self.port)?;
        let profile = users
            .get(email)
            .cloned()
            .ok_or_else(|| AuthError::UserNotFound(email.to_string()))?;

        let verified = passwords
            .credential(email)
            .is_some_and(|entry| entry.matches(password));
        if !verified {
            return Err(AuthError::InvalidCredentials(email.to_string()).into());
        }

        self.port.set(USER_DATA, encode_json(USER_DATA, &profile)?)?;
        Ok(profile)
    }

    /// Clears the session record. Logging out twice is fine.
    pub fn logout(&mut self) -> Result<(), HostifyError> {
        self.port.remove(USER_DATA)?;
        Ok(())
    }

    /// The profile of the current session, or `None` when logged out.
    pub fn current_session(&self) -> Result<Option<UserProfile>, HostifyError> {
        let session: Option<UserProfile> = read_json(&self.port, USER_DATA)?;
        if let Some(profile) = &session {
            profile
                .check()
                .map_err(|reason| StorageError::corrupt(USER_DATA, reason))?;
        }
        Ok(session)
    }

    pub fn lookup_by_email(&self, email: &str) -> Result<Option<UserProfile>, HostifyError> {
        let users = UserDirectory::load(&self.port)?;
        Ok(users.get(email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store(policy: AuthPolicy) -> CredentialStore<MemoryStorage> {
        CredentialStore::new(MemoryStorage::new(), policy)
    }

    fn alex() -> RegistrationInput {
        RegistrationInput {
            name: "Alex Johnson".into(),
            email: "alex@example.edu".into(),
            password: "secret1".into(),
            student_id: "STU001".into(),
        }
    }

    #[test]
    fn test_register_writes_both_directories() {
        let mut store = store(AuthPolicy::default());
        let profile = store.register(alex()).unwrap();
        assert_eq!(profile.email(), "alex@example.edu");

        let port = store.port();
        assert!(port.contains_key(REGISTERED_USERS));
        assert!(port.contains_key(USER_PASSWORDS));
        assert!(!port.contains_key(USER_DATA));

        let users = port.get(REGISTERED_USERS).unwrap().unwrap();
        assert!(!users.contains("secret1"));
    }

    #[test]
    fn test_auto_login_policy() {
        let mut store = store(AuthPolicy {
            auto_login_on_register: true,
            ..AuthPolicy::default()
        });
        let profile = store.register(alex()).unwrap();
        assert_eq!(store.current_session().unwrap(), Some(profile));
    }

    #[test]
    fn test_malformed_input_leaves_storage_untouched() {
        let mut store = store(AuthPolicy::default());
        let err = store
            .register(RegistrationInput {
                password: "123".into(),
                ..alex()
            })
            .unwrap_err();
        assert!(matches!(err, HostifyError::Auth(AuthError::MalformedInput(_))));
        assert!(store.port().is_empty());
    }

    #[test]
    fn test_login_failures() {
        let mut store = store(AuthPolicy::default());
        store.register(alex()).unwrap();

        let err = store.login("nobody@example.edu", "secret1").unwrap_err();
        assert!(matches!(err, HostifyError::Auth(AuthError::UserNotFound(_))));

        let err = store.login("alex@example.edu", "secret2").unwrap_err();
        assert!(matches!(err, HostifyError::Auth(AuthError::InvalidCredentials(_))));

        let err = store.login("alex@example.edu", "").unwrap_err();
        assert!(matches!(err, HostifyError::Auth(AuthError::MalformedInput(_))));

        assert_eq!(store.current_session().unwrap(), None);
    }

    #[test]
    fn test_whitespace_password_round_trip() {
        let mut store = store(AuthPolicy::default());
        store
            .register(RegistrationInput {
                password: "      ".into(),
                ..alex()
            })
            .unwrap();

        let err = store.login("alex@example.edu", "   ").unwrap_err();
        assert!(matches!(err, HostifyError::Auth(AuthError::InvalidCredentials(_))));

        let profile = store.login("alex@example.edu", "      ").unwrap();
        assert_eq!(store.current_session().unwrap(), Some(profile));
    }

    #[test]
    fn test_corrupt_session_record() {
        let mut port = MemoryStorage::new();
        port.set(USER_DATA, "{\"name\":\"x\"}".into()).unwrap();
        let store = CredentialStore::new(port, AuthPolicy::default());
        assert!(matches!(
            store.current_session(),
            Err(HostifyError::Storage(StorageError::CorruptState { .. }))
        ));
    }

    #[test]
    fn test_lookup_by_email() {
        let mut store = store(AuthPolicy::default());
        assert_eq!(store.lookup_by_email("alex@example.edu").unwrap(), None);
        let profile = store.register(alex()).unwrap();
        assert_eq!(store.lookup_by_email("alex@example.edu").unwrap(), Some(profile));
        assert_eq!(store.lookup_by_email("ALEX@example.edu").unwrap(), None);
    }
}
