//! Connection records and their status lifecycle
//!
//! A connection is a directed request between two users to team up. The
//! direction records who asked whom; for uniqueness the pair is unordered
//! (see [`crate::pair::PairKey`]). Status moves `pending -> accepted` or
//! `pending -> rejected`, both terminal, and only the recipient may decide.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use crate::id::{ConnectionId, UserId};
use crate::pair::PairKey;

/// Lifecycle status of a connection request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ConnectionStatus {
    /// Accepted and rejected are terminal; no further transitions
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ConnectionStatus::Pending)
    }
}

impl Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Pending => write!(f, "pending"),
            ConnectionStatus::Accepted => write!(f, "accepted"),
            ConnectionStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// The recipient's decision on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseDecision {
    Accept,
    Reject,
}

impl ResponseDecision {
    /// The status a pending connection moves to under this decision
    pub fn target_status(&self) -> ConnectionStatus {
        match self {
            ResponseDecision::Accept => ConnectionStatus::Accepted,
            ResponseDecision::Reject => ConnectionStatus::Rejected,
        }
    }
}

/// A connection request between two users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// Unique identifier for this connection
    pub id: ConnectionId,

    /// The user who sent the request
    pub initiator_id: UserId,

    /// The user who received the request
    pub recipient_id: UserId,

    pub status: ConnectionStatus,

    /// When the request was sent. Immutable.
    pub created_at: chrono::DateTime<chrono::Utc>,

    /// When the status last changed. Equal to `created_at` until the
    /// recipient responds.
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Connection {
    /// True if `user` is the initiator or the recipient
    pub fn is_party(&self, user: UserId) -> bool {
        self.initiator_id == user || self.recipient_id == user
    }

    /// The other participant, if `user` is a party at all
    pub fn other_party(&self, user: UserId) -> Option<UserId> {
        if user == self.initiator_id {
            Some(self.recipient_id)
        } else if user == self.recipient_id {
            Some(self.initiator_id)
        } else {
            None
        }
    }

    /// The normalized pair key for this connection's two parties
    pub fn pair_key(&self) -> PairKey {
        // initiator != recipient is enforced at creation
        PairKey::new(self.initiator_id, self.recipient_id)
            .expect("stored connection has two distinct, non-nil parties")
    }

    /// True if `responder` is allowed to decide this request
    pub fn may_respond(&self, responder: UserId) -> bool {
        responder == self.recipient_id
    }
}
