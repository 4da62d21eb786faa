//! Console portal
//!
//! A line-oriented front-end over the credential store: reads one command
//! per line, simulates the API delay for form submissions, and writes the
//! resulting notice back.

pub mod commands;
pub mod handlers;
pub mod routes;

use log::{debug, info};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub use commands::{Command, parse_command};
pub use handlers::{CommandResult, CommandStatus, handle_command};
pub use routes::{Navigation, Route, resolve};

use crate::auth::CredentialStore;
use crate::error::HostifyError;
use crate::storage::PersistencePort;

const MAX_LINE_LENGTH: usize = 1024;

const GREETING: &str = "Welcome to Hostify, the hostel management portal. Type HELP for commands.\n";

/// Runs the portal until QUIT or end of input.
pub async fn run<P, R, W>(
    store: &mut CredentialStore<P>,
    submit_delay: Duration,
    mut reader: R,
    mut writer: W,
) -> Result<(), HostifyError>
where
    P: PersistencePort,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    writer.write_all(GREETING.as_bytes()).await?;
    writer.flush().await?;

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            info!("End of input, closing portal");
            break;
        }

        if line.len() > MAX_LINE_LENGTH {
            writer.write_all(b"Input too long\n").await?;
            writer.flush().await?;
            continue;
        }

        let command = parse_command(&line);
        debug!("Received {}", command.verb());

        if command.is_submission() && !submit_delay.is_zero() {
            writer.write_all(b"Submitting...\n").await?;
            writer.flush().await?;
            tokio::time::sleep(submit_delay).await;
        }

        let result = handle_command(store, &command);
        if let Some(msg) = &result.message {
            writer.write_all(msg.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        if result.status == CommandStatus::Exit {
            info!("Portal closed by user");
            break;
        }
    }

    Ok(())
}
