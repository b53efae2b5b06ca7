use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("File system error: {0}")]
    FileSystem(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

pub type InfrastructureResult<T> = Result<T, InfrastructureError>;

impl From<reqwest::Error> for InfrastructureError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            InfrastructureError::Serialization(error.to_string())
        } else {
            InfrastructureError::Network(error.to_string())
        }
    }
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Status { status: 401, body } => {
                DomainError::NotAuthenticated(body)
            }
            err @ InfrastructureError::Status { .. } => DomainError::RemoteRejected(err.to_string()),
            InfrastructureError::Network(msg) => DomainError::RemoteRejected(msg),
            InfrastructureError::Serialization(msg) => DomainError::SerializationError(msg),
            InfrastructureError::FileSystem(msg) => DomainError::RepositoryError(msg),
            InfrastructureError::Configuration(msg) => DomainError::Other(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_unauthorized_status_when_into_domain_then_not_authenticated() {
        let err: DomainError = InfrastructureError::Status {
            status: 401,
            body: "JWT expired".to_string(),
        }
        .into();
        assert!(matches!(err, DomainError::NotAuthenticated(msg) if msg == "JWT expired"));
    }

    #[test]
    fn given_other_status_when_into_domain_then_remote_rejected_with_status() {
        let err: DomainError = InfrastructureError::Status {
            status: 409,
            body: "duplicate key".to_string(),
        }
        .into();
        match err {
            DomainError::RemoteRejected(msg) => {
                assert!(msg.contains("409"));
                assert!(msg.contains("duplicate key"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
