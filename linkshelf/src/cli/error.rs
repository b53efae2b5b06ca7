// src/cli/error.rs
use crate::application::error::ApplicationError;
use crate::domain::error::DomainError;
use crate::exitcode;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not signed in, run `linkshelf login` first")]
    NotSignedIn,

    /// The remote service refused the change; the message stays quiet
    #[error("{0}")]
    Rejected(String),

    #[error("Operation aborted by user")]
    OperationAborted,

    #[error("Application error: {0}")]
    Application(ApplicationError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            CliError::CommandFailed(msg) => {
                CliError::CommandFailed(format!("{}: {}", context.into(), msg))
            }
            CliError::InvalidInput(msg) => {
                CliError::InvalidInput(format!("{}: {}", context.into(), msg))
            }
            CliError::Application(err) => CliError::Application(err.context(context)),
            CliError::Other(msg) => CliError::Other(format!("{}: {}", context.into(), msg)),
            err => CliError::Other(format!("{}: {}", context.into(), err)),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotSignedIn => exitcode::NOPERM,
            CliError::Rejected(_) => exitcode::UNAVAILABLE,
            CliError::OperationAborted => exitcode::CANCEL,
            CliError::Application(ApplicationError::Domain(DomainError::NotAuthenticated(_))) => {
                exitcode::NOPERM
            }
            _ => exitcode::USAGE,
        }
    }
}

impl From<ApplicationError> for CliError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::NotSignedIn => CliError::NotSignedIn,
            err => CliError::Application(err),
        }
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::from(ApplicationError::Domain(err))
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_not_signed_in_when_from_application_error_then_dedicated_variant() {
        let err = CliError::from(ApplicationError::NotSignedIn);
        assert!(matches!(err, CliError::NotSignedIn));
        assert_eq!(err.exit_code(), exitcode::NOPERM);
    }

    #[test]
    fn given_rejected_when_exit_code_then_unavailable() {
        assert_eq!(
            CliError::Rejected(String::new()).exit_code(),
            exitcode::UNAVAILABLE
        );
        assert_eq!(
            CliError::InvalidInput("x".to_string()).exit_code(),
            exitcode::USAGE
        );
    }

    #[test]
    fn given_context_when_invalid_input_then_message_prefixed() {
        let err = CliError::InvalidInput("bad".to_string()).context("add");
        assert_eq!(err.to_string(), "Invalid input: add: bad");
    }
}
