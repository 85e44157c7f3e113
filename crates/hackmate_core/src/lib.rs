//! Hackmate Core - Teammate Matching Domain Model
//!
//! This crate provides the data model, connection lifecycle, and persistence
//! layer for Hackmate's hackathon teammate matching: profiles, hackathon
//! listings, connection requests, and gated direct messaging.
//!
//! Authentication, real-time notification delivery, and presentation are the
//! embedding application's concern; this core trusts the user identity it is
//! handed and never holds ambient session state.

pub mod config;
pub mod connection;
pub mod db;
pub mod error;
pub mod hackathon;
pub mod id;
pub mod message;
pub mod pair;
pub mod profile;

// Macros are automatically available at crate root due to #[macro_export]

pub use config::CoreConfig;
pub use connection::{Connection, ConnectionStatus, ResponseDecision};
pub use db::{DatabaseConfig, DatabaseError, SurrealExt};
pub use error::{CoreError, Result};
pub use hackathon::{EventFormat, Hackathon};
pub use id::{ConnectionId, HackathonId, Id, IdType, MessageId, UserId};
pub use message::Message;
pub use pair::PairKey;
pub use profile::{Availability, Profile, ProfileFilter, Proficiency};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        Availability, Connection, ConnectionId, ConnectionStatus, CoreConfig, CoreError,
        EventFormat, Hackathon, HackathonId, Id, IdType, Message, MessageId, PairKey, Profile,
        ProfileFilter, Proficiency, ResponseDecision, Result, SurrealExt, UserId,
    };
}

#[cfg(test)]
mod tests {

    #[test]
    fn it_works() {
        // Basic smoke test
        assert_eq!(2 + 2, 4);
    }
}
