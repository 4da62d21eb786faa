//! Module `commands`
//!
//! Parses the line-oriented input of the console portal into [`Command`]s.
//! Each form submission is a single line.

use crate::auth::RegistrationForm;

/// A portal command parsed from one input line.
#[derive(Debug, PartialEq)]
pub enum Command {
    /// `REGISTER <email> <studentId> <password> <confirmPassword> <name...>`
    Register(RegistrationForm),
    /// `LOGIN <email> <password>`
    Login { email: String, password: String },
    Logout,
    WhoAmI,
    /// `OPEN <path>`: navigate to a page
    Open(String),
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Verb used in logs. Arguments are left out so passwords never reach the log.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Register(_) => "REGISTER",
            Command::Login { .. } => "LOGIN",
            Command::Logout => "LOGOUT",
            Command::WhoAmI => "WHOAMI",
            Command::Open(_) => "OPEN",
            Command::Help => "HELP",
            Command::Quit => "QUIT",
            Command::Unknown(_) => "UNKNOWN",
        }
    }

    /// Form submissions go through the simulated API delay.
    pub fn is_submission(&self) -> bool {
        matches!(self, Command::Register(_) | Command::Login { .. })
    }
}

/// Splits off the next whitespace-delimited token.
fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.split_once(char::is_whitespace) {
        Some((token, rest)) => Some((token, rest)),
        None => Some((input, "")),
    }
}

fn parse_register(arg: &str) -> Option<RegistrationForm> {
    let (email, rest) = next_token(arg)?;
    let (student_id, rest) = next_token(rest)?;
    let (password, rest) = next_token(rest)?;
    let (confirm_password, rest) = next_token(rest)?;
    let name = rest.trim();
    if name.is_empty() {
        return None;
    }

    Some(RegistrationForm {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        confirm_password: confirm_password.to_string(),
        student_id: student_id.to_string(),
    })
}

fn parse_login(arg: &str) -> Option<Command> {
    let (email, rest) = next_token(arg)?;
    let (password, rest) = next_token(rest)?;
    if !rest.trim().is_empty() {
        return None;
    }
    Some(Command::Login {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Parses a raw input line into a `Command`.
///
/// Known verbs with missing or extra arguments become `Unknown`.
pub fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_ascii_uppercase();
    let arg = parts.next().unwrap_or("").trim();

    let parsed = match cmd.as_str() {
        "REGISTER" => parse_register(arg).map(Command::Register),
        "LOGIN" => parse_login(arg),
        "LOGOUT" if arg.is_empty() => Some(Command::Logout),
        "WHOAMI" if arg.is_empty() => Some(Command::WhoAmI),
        "OPEN" if !arg.is_empty() => Some(Command::Open(arg.to_string())),
        "HELP" | "?" => Some(Command::Help),
        "QUIT" | "Q" | "EXIT" => Some(Command::Quit),
        _ => None,
    };

    parsed.unwrap_or_else(|| Command::Unknown(cmd))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse_command("LOGOUT"), Command::Logout);
        assert_eq!(parse_command("whoami"), Command::WhoAmI);
        assert_eq!(parse_command("HELP"), Command::Help);
        assert_eq!(parse_command("Q"), Command::Quit);
        assert_eq!(parse_command("exit"), Command::Quit);
    }

    #[test]
    fn test_parse_register_keeps_spaces_in_name() {
        assert_eq!(
            parse_command("REGISTER alex@example.edu STU001 secret1 secret1 Alex  Johnson "),
            Command::Register(RegistrationForm {
                name: "Alex  Johnson".into(),
                email: "alex@example.edu".into(),
                password: "secret1".into(),
                confirm_password: "secret1".into(),
                student_id: "STU001".into(),
            })
        );
    }

    #[test]
    fn test_parse_login() {
        assert_eq!(
            parse_command("login alex@example.edu secret1"),
            Command::Login {
                email: "alex@example.edu".into(),
                password: "secret1".into(),
            }
        );
    }

    #[test]
    fn test_parse_with_args() {
        assert_eq!(
            parse_command("OPEN /mess-menu"),
            Command::Open("/mess-menu".into())
        );
        assert_eq!(
            parse_command("OPEN  room-switch  "),
            Command::Open("room-switch".into())
        );
    }

    #[test]
    fn test_missing_arguments_are_unknown() {
        assert_eq!(
            parse_command("REGISTER alex@example.edu STU001 secret1 secret1"),
            Command::Unknown("REGISTER".into())
        );
        assert_eq!(
            parse_command("LOGIN alex@example.edu"),
            Command::Unknown("LOGIN".into())
        );
        assert_eq!(parse_command("OPEN"), Command::Unknown("OPEN".into()));
        assert_eq!(parse_command("LOGOUT now"), Command::Unknown("LOGOUT".into()));
        assert_eq!(parse_command(""), Command::Unknown("".into()));
    }

    #[test]
    fn test_directory_lookup_is_not_a_command() {
        assert_eq!(
            parse_command("LOOKUP alex@example.edu"),
            Command::Unknown("LOOKUP".into())
        );
    }

    #[test]
    fn test_submissions() {
        assert!(parse_command("LOGIN a@b.co secret1").is_submission());
        assert!(!parse_command("WHOAMI").is_submission());
        assert_eq!(parse_command("LOGIN a@b.co secret1").verb(), "LOGIN");
    }
}
