//! Direct messages between connected users

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::id::{ConnectionId, MessageId, UserId};

/// A direct message within an accepted connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,

    /// The connection this message belongs to
    pub connection_id: ConnectionId,

    pub sender_id: UserId,

    pub content: String,

    /// Set once the other party has seen the message
    pub read: bool,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Reject empty and whitespace-only message bodies before any write
pub fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(CoreError::invalid_input(
            "content",
            "message content cannot be empty",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_validation() {
        assert!(validate_content("hey, want to team up?").is_ok());
        assert!(validate_content("").is_err());
        assert!(validate_content("   \n\t").is_err());
    }
}
