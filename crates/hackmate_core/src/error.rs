use crate::connection::ConnectionStatus;
use crate::db::DatabaseError;
use crate::id::{ConnectionId, UserId};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CoreError {
    #[error("Invalid user identity")]
    #[diagnostic(
        code(hackmate_core::invalid_identity),
        help("User identities are issued at sign-in; a nil or empty identity cannot take part in any operation")
    )]
    InvalidIdentity { user_id: String },

    #[error("Cannot create a connection with yourself")]
    #[diagnostic(
        code(hackmate_core::self_connection),
        help("Connection requests need two distinct users; {user_id} appears on both sides")
    )]
    SelfConnection { user_id: UserId },

    #[error("Connection already exists")]
    #[diagnostic(
        code(hackmate_core::duplicate_connection),
        help("A connection already exists with this user (status: {status}); re-requesting is not permitted")
    )]
    DuplicateConnection {
        initiator_id: UserId,
        recipient_id: UserId,
        status: ConnectionStatus,
    },

    #[error("{entity} not found")]
    #[diagnostic(
        code(hackmate_core::not_found),
        help("Check that the ID is correct: {id}")
    )]
    NotFound { entity: String, id: String },

    #[error("Invalid connection state transition")]
    #[diagnostic(
        code(hackmate_core::invalid_transition),
        help("Connection {connection_id} is '{current}'; only pending requests can be accepted or rejected")
    )]
    InvalidTransition {
        connection_id: ConnectionId,
        current: ConnectionStatus,
    },

    #[error("Not authorized to {action}")]
    #[diagnostic(
        code(hackmate_core::unauthorized),
        help("User {user_id} is not permitted to {action}")
    )]
    Unauthorized { user_id: UserId, action: String },

    #[error("Invalid {field}")]
    #[diagnostic(code(hackmate_core::invalid_input), help("{reason}"))]
    InvalidInput { field: String, reason: String },

    #[error("Configuration error")]
    #[diagnostic(
        code(hackmate_core::configuration_error),
        help("Check configuration file at {config_path}")
    )]
    ConfigurationError {
        config_path: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Storage unavailable")]
    #[diagnostic(
        code(hackmate_core::storage),
        help("The persistence layer failed; check database connectivity")
    )]
    Storage(#[from] DatabaseError),
}

pub type Result<T> = std::result::Result<T, CoreError>;

// Helper functions for creating common errors with context
impl CoreError {
    pub fn invalid_identity(id: UserId) -> Self {
        Self::InvalidIdentity {
            user_id: id.to_string(),
        }
    }

    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn unauthorized(user_id: UserId, action: impl Into<String>) -> Self {
        Self::Unauthorized {
            user_id,
            action: action.into(),
        }
    }

    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Report;

    #[test]
    fn test_not_found_error() {
        let error = CoreError::not_found("Connection", "conn_123");
        let report = Report::new(error);
        let output = format!("{:?}", report);
        assert!(output.contains("not_found"));
        assert!(output.contains("conn_123"));
    }

    #[test]
    fn test_unauthorized_error() {
        let user = UserId::generate();
        let error = CoreError::unauthorized(user, "respond to this connection request");
        let report = Report::new(error);
        let output = format!("{:?}", report);
        assert!(output.contains("respond to this connection request"));
    }
}
