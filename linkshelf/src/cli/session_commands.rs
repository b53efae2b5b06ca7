// src/cli/session_commands.rs
use crate::cli::error::{CliError, CliResult};
use crate::infrastructure::di::ServiceContainer;
use inquire::{InquireError, Password, PasswordDisplayMode};
use std::io::{self, BufRead, IsTerminal, Write};
use termcolor::WriteColor;
use tracing::instrument;

#[instrument(skip(out, services, password))]
pub fn login<W: WriteColor>(
    out: &mut W,
    services: &ServiceContainer,
    email: &str,
    password: Option<String>,
) -> CliResult<()> {
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };

    let session = services.session_service.sign_in(email, &password)?;
    writeln!(
        out,
        "Signed in as {}",
        session.user.email.as_deref().unwrap_or(&session.user.id)
    )?;
    Ok(())
}

/// Prompts without echo on a terminal; otherwise reads one line from stdin so
/// the password can be piped in.
fn read_password() -> CliResult<String> {
    if io::stdin().is_terminal() {
        return match Password::new("Password:")
            .without_confirmation()
            .with_display_mode(PasswordDisplayMode::Hidden)
            .prompt()
        {
            Ok(password) => Ok(password),
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
                Err(CliError::OperationAborted)
            }
            Err(e) => Err(CliError::Other(format!("Failed to read password: {}", e))),
        };
    }

    eprint!("Password: ");
    io::stderr().flush()?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Err(CliError::OperationAborted);
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[instrument(skip(out, services))]
pub fn logout<W: WriteColor>(out: &mut W, services: &ServiceContainer) -> CliResult<()> {
    services.session_service.sign_out()?;
    writeln!(out, "Signed out")?;
    Ok(())
}

#[instrument(skip(services))]
pub fn whoami(services: &ServiceContainer) -> CliResult<()> {
    let session = services.session_service.require()?;
    match session.user.email {
        Some(email) => println!("{}\t{}", session.user.id, email),
        None => println!("{}", session.user.id),
    }
    Ok(())
}
