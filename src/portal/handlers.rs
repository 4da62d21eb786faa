//! Command handlers for the Hostify portal.
//!
//! Each handler runs one credential store operation and turns the outcome
//! into the message the user sees. Store failures are translated with
//! [`user_notice`]; only unexpected failures are logged.

use log::info;

use super::commands::Command;
use super::routes::{Navigation, Route, resolve};
use crate::auth::{CredentialStore, RegistrationForm, UserProfile};
use crate::error::HostifyError;
use crate::error::handlers::{handle_error, user_notice};
use crate::storage::PersistencePort;

/// Represents the outcome status of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    Exit,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

impl CommandResult {
    fn success(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Success,
            message: Some(message.into()),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status: CommandStatus::Failure(message.clone()),
            message: Some(message),
        }
    }

    fn from_error(err: HostifyError) -> Self {
        handle_error(&err);
        Self::failure(user_notice(&err))
    }
}

const HELP_TEXT: &str = "\
Commands:
  REGISTER <email> <studentId> <password> <confirmPassword> <full name>
  LOGIN <email> <password>
  LOGOUT
  WHOAMI
  OPEN <path>          e.g. OPEN /dashboard
  HELP
  QUIT";

/// Dispatches a parsed command to its handler.
pub fn handle_command<P: PersistencePort>(
    store: &mut CredentialStore<P>,
    command: &Command,
) -> CommandResult {
    match command {
        Command::Register(form) => handle_cmd_register(store, form),
        Command::Login { email, password } => handle_cmd_login(store, email, password),
        Command::Logout => handle_cmd_logout(store),
        Command::WhoAmI => handle_cmd_whoami(store),
        Command::Open(path) => handle_cmd_open(store, path),
        Command::Help => CommandResult::success(HELP_TEXT),
        Command::Quit => CommandResult {
            status: CommandStatus::Exit,
            message: Some("Goodbye".into()),
        },
        Command::Unknown(verb) if verb.is_empty() => CommandResult::failure("Type HELP for commands"),
        Command::Unknown(verb) => {
            CommandResult::failure(format!("Unknown or incomplete command: {}", verb))
        }
    }
}

fn describe(profile: &UserProfile) -> String {
    format!(
        "{} <{}>, student ID {}, member since {}",
        profile.name(),
        profile.email(),
        profile.student_id(),
        profile.created_at().format("%Y-%m-%d")
    )
}

fn handle_cmd_register<P: PersistencePort>(
    store: &mut CredentialStore<P>,
    form: &RegistrationForm,
) -> CommandResult {
    match store.register_form(form.clone()) {
        Ok(profile) => {
            info!("Registered {}", profile.email());
            let next = if store.policy().auto_login_on_register {
                Route::Dashboard
            } else {
                Route::Login
            };
            CommandResult::success(format!("Registration successful!\n-> {}", next))
        }
        Err(e) => CommandResult::from_error(e),
    }
}

fn handle_cmd_login<P: PersistencePort>(
    store: &mut CredentialStore<P>,
    email: &str,
    password: &str,
) -> CommandResult {
    match store.login(email, password) {
        Ok(profile) => {
            info!("Logged in {}", profile.email());
            CommandResult::success(format!(
                "Login successful! Welcome, {}\n-> {}",
                profile.name(),
                Route::Dashboard
            ))
        }
        Err(e) => CommandResult::from_error(e),
    }
}

fn handle_cmd_logout<P: PersistencePort>(store: &mut CredentialStore<P>) -> CommandResult {
    match store.logout() {
        Ok(()) => CommandResult::success(format!("Logged out\n-> {}", Route::Login)),
        Err(e) => CommandResult::from_error(e),
    }
}

fn handle_cmd_whoami<P: PersistencePort>(store: &CredentialStore<P>) -> CommandResult {
    match store.current_session() {
        Ok(Some(profile)) => CommandResult::success(describe(&profile)),
        Ok(None) => CommandResult::success("Not logged in"),
        Err(e) => CommandResult::from_error(e),
    }
}

/// Polls the session once and either renders the page header or redirects.
fn handle_cmd_open<P: PersistencePort>(store: &CredentialStore<P>, path: &str) -> CommandResult {
    let route = match path.parse::<Route>() {
        Ok(route) => route,
        Err(unknown) => return CommandResult::failure(format!("Page not found: {}", unknown)),
    };

    let session = match store.current_session() {
        Ok(session) => session,
        Err(e) => return CommandResult::from_error(e),
    };

    match resolve(route, session.as_ref()) {
        Navigation::Redirect(target) => CommandResult::success(format!("-> {}", target)),
        Navigation::Render(page) => match &session {
            Some(profile) if page.requires_session() => CommandResult::success(format!(
                "== {} ==\nWelcome back, {}",
                page.title(),
                profile.name()
            )),
            _ => CommandResult::success(format!("== {} ==", page.title())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthPolicy;
    use crate::portal::commands::parse_command;
    use crate::storage::MemoryStorage;

    fn run(store: &mut CredentialStore<MemoryStorage>, line: &str) -> CommandResult {
        handle_command(store, &parse_command(line))
    }

    #[test]
    fn test_register_then_login_flow() {
        let mut store = CredentialStore::new(MemoryStorage::new(), AuthPolicy::default());

        let result = run(&mut store, "REGISTER alex@example.edu STU001 secret1 secret1 Alex Johnson");
        assert_eq!(result.status, CommandStatus::Success);
        assert!(result.message.unwrap().ends_with("-> /login"));

        let result = run(&mut store, "OPEN /dashboard");
        assert_eq!(result.message.as_deref(), Some("-> /login"));

        let result = run(&mut store, "LOGIN alex@example.edu secret1");
        assert_eq!(result.status, CommandStatus::Success);

        let result = run(&mut store, "OPEN /dashboard");
        assert_eq!(
            result.message.as_deref(),
            Some("== Dashboard ==\nWelcome back, Alex Johnson")
        );

        let result = run(&mut store, "WHOAMI");
        assert!(result.message.unwrap().starts_with("Alex Johnson <alex@example.edu>"));
    }

    #[test]
    fn test_failures_become_notices() {
        let mut store = CredentialStore::new(MemoryStorage::new(), AuthPolicy::default());
        run(&mut store, "REGISTER alex@example.edu STU001 secret1 secret1 Alex");

        let result = run(&mut store, "REGISTER alex@example.edu STU002 secret2 secret2 Alex Two");
        assert_eq!(
            result.status,
            CommandStatus::Failure("User with this email already exists".into())
        );

        let result = run(&mut store, "REGISTER sam@example.edu STU003 secret1 secret2 Sam");
        assert_eq!(result.status, CommandStatus::Failure("Passwords do not match".into()));

        let result = run(&mut store, "LOGIN nobody@example.edu secret1");
        assert_eq!(result.status, CommandStatus::Failure("User not found".into()));

        let result = run(&mut store, "LOGIN alex@example.edu wrong12");
        assert_eq!(result.status, CommandStatus::Failure("Invalid password".into()));

        let result = run(&mut store, "LOOKUP alex@example.edu");
        assert_eq!(
            result.status,
            CommandStatus::Failure("Unknown or incomplete command: LOOKUP".into())
        );

        let result = run(&mut store, "OPEN /laundry");
        assert_eq!(result.status, CommandStatus::Failure("Page not found: /laundry".into()));
    }

    #[test]
    fn test_auto_login_redirects_to_dashboard() {
        let policy = AuthPolicy {
            auto_login_on_register: true,
            ..AuthPolicy::default()
        };
        let mut store = CredentialStore::new(MemoryStorage::new(), policy);
        let result = run(&mut store, "REGISTER alex@example.edu STU001 secret1 secret1 Alex");
        assert!(result.message.unwrap().ends_with("-> /dashboard"));
        assert_eq!(run(&mut store, "OPEN /").message.as_deref(), Some("-> /dashboard"));
    }

    #[test]
    fn test_quit_and_logout() {
        let mut store = CredentialStore::new(MemoryStorage::new(), AuthPolicy::default());
        assert_eq!(run(&mut store, "LOGOUT").status, CommandStatus::Success);
        assert_eq!(run(&mut store, "QUIT").status, CommandStatus::Exit);
    }
}
