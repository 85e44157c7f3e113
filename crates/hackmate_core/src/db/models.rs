//! Database model wrappers
//!
//! These types mirror the domain types but use RecordId for database
//! operations. This allows us to maintain type safety in the domain while
//! working with SurrealDB's record ID format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::connection::{Connection, ConnectionStatus};
use crate::hackathon::{EventFormat, Hackathon};
use crate::id::{ConnectionId, HackathonId, MessageId, UserId};
use crate::message::Message;
use crate::profile::{Availability, HackathonInterest, Profile, Skill, SpokenLanguage};

pub fn strip_brackets(s: &str) -> &str {
    s.strip_prefix('⟨')
        .and_then(|s| s.strip_suffix('⟩'))
        .or_else(|| s.strip_prefix('`').and_then(|s| s.strip_suffix('`')))
        .unwrap_or(s)
}

pub fn from_surreal_datetime(dt: surrealdb::Datetime) -> DateTime<Utc> {
    DateTime::<Utc>::from(dt.into_inner())
}

/// Record pointer for a profile row, keyed by the owning user's UUID
pub fn profile_record_id(user_id: UserId) -> RecordId {
    RecordId::from_table_key(
        crate::db::schema::PROFILE_TABLE,
        user_id.uuid().to_string(),
    )
}

/// Database representation of a Profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbProfile {
    pub id: RecordId,
    pub user_id: RecordId,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub website_url: Option<String>,
    pub availability: Availability,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub languages: Vec<SpokenLanguage>,
    #[serde(default)]
    pub interests: Vec<HackathonInterest>,
    pub created_at: surrealdb::Datetime,
    pub updated_at: surrealdb::Datetime,
}

/// Database representation of a Hackathon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbHackathon {
    pub id: RecordId,
    pub owner_id: RecordId,
    pub title: String,
    pub description: String,
    pub start_date: surrealdb::Datetime,
    pub end_date: surrealdb::Datetime,
    pub format: EventFormat,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub theme: Option<String>,
    pub max_team_size: u32,
    pub created_at: surrealdb::Datetime,
}

/// Database representation of a Connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbConnection {
    pub id: RecordId,
    pub pair_key: String,
    pub initiator_id: RecordId,
    pub recipient_id: RecordId,
    pub status: ConnectionStatus,
    pub created_at: surrealdb::Datetime,
    pub updated_at: surrealdb::Datetime,
}

/// Database representation of a Message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbMessage {
    pub id: RecordId,
    pub connection_id: RecordId,
    pub sender_id: RecordId,
    pub content: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: surrealdb::Datetime,
}

// Conversion implementations

impl From<Profile> for DbProfile {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile_record_id(profile.user_id),
            user_id: profile.user_id.into(),
            full_name: profile.full_name,
            avatar_url: profile.avatar_url,
            location: profile.location,
            timezone: profile.timezone,
            github_url: profile.github_url,
            linkedin_url: profile.linkedin_url,
            website_url: profile.website_url,
            availability: profile.availability,
            skills: profile.skills,
            languages: profile.languages,
            interests: profile.interests,
            created_at: profile.created_at.into(),
            updated_at: profile.updated_at.into(),
        }
    }
}

impl TryFrom<DbProfile> for Profile {
    type Error = crate::id::IdError;

    fn try_from(db: DbProfile) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::from_record(db.user_id)?,
            full_name: db.full_name,
            avatar_url: db.avatar_url,
            location: db.location,
            timezone: db.timezone,
            github_url: db.github_url,
            linkedin_url: db.linkedin_url,
            website_url: db.website_url,
            availability: db.availability,
            skills: db.skills,
            languages: db.languages,
            interests: db.interests,
            created_at: from_surreal_datetime(db.created_at),
            updated_at: from_surreal_datetime(db.updated_at),
        })
    }
}

impl From<Hackathon> for DbHackathon {
    fn from(hackathon: Hackathon) -> Self {
        Self {
            id: RecordId::from(hackathon.id),
            owner_id: hackathon.owner_id.into(),
            title: hackathon.title,
            description: hackathon.description,
            start_date: hackathon.start_date.into(),
            end_date: hackathon.end_date.into(),
            format: hackathon.format,
            location: hackathon.location,
            theme: hackathon.theme,
            max_team_size: hackathon.max_team_size,
            created_at: hackathon.created_at.into(),
        }
    }
}

impl TryFrom<DbHackathon> for Hackathon {
    type Error = crate::id::IdError;

    fn try_from(db: DbHackathon) -> Result<Self, Self::Error> {
        Ok(Self {
            id: HackathonId::from_record(db.id)?,
            owner_id: UserId::from_record(db.owner_id)?,
            title: db.title,
            description: db.description,
            start_date: from_surreal_datetime(db.start_date),
            end_date: from_surreal_datetime(db.end_date),
            format: db.format,
            location: db.location,
            theme: db.theme,
            max_team_size: db.max_team_size,
            created_at: from_surreal_datetime(db.created_at),
        })
    }
}

impl From<Connection> for DbConnection {
    fn from(conn: Connection) -> Self {
        Self {
            id: RecordId::from(conn.id),
            pair_key: conn.pair_key().to_string(),
            initiator_id: conn.initiator_id.into(),
            recipient_id: conn.recipient_id.into(),
            status: conn.status,
            created_at: conn.created_at.into(),
            updated_at: conn.updated_at.into(),
        }
    }
}

impl TryFrom<DbConnection> for Connection {
    type Error = crate::id::IdError;

    fn try_from(db: DbConnection) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ConnectionId::from_record(db.id)?,
            initiator_id: UserId::from_record(db.initiator_id)?,
            recipient_id: UserId::from_record(db.recipient_id)?,
            status: db.status,
            created_at: from_surreal_datetime(db.created_at),
            updated_at: from_surreal_datetime(db.updated_at),
        })
    }
}

impl From<Message> for DbMessage {
    fn from(msg: Message) -> Self {
        Self {
            id: RecordId::from(msg.id),
            connection_id: msg.connection_id.into(),
            sender_id: msg.sender_id.into(),
            content: msg.content,
            read: msg.read,
            created_at: msg.created_at.into(),
        }
    }
}

impl TryFrom<DbMessage> for Message {
    type Error = crate::id::IdError;

    fn try_from(db: DbMessage) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MessageId::from_record(db.id)?,
            connection_id: ConnectionId::from_record(db.connection_id)?,
            sender_id: UserId::from_record(db.sender_id)?,
            content: db.content,
            read: db.read,
            created_at: from_surreal_datetime(db.created_at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_strip_brackets() {
        assert_eq!(strip_brackets("⟨abc⟩"), "abc");
        assert_eq!(strip_brackets("abc"), "abc");
    }

    #[test]
    fn test_connection_round_trip() {
        let now = Utc::now();
        let conn = Connection {
            id: ConnectionId::generate(),
            initiator_id: UserId::generate(),
            recipient_id: UserId::generate(),
            status: ConnectionStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let db = DbConnection::from(conn.clone());
        assert_eq!(db.pair_key, conn.pair_key().to_string());

        let back = Connection::try_from(db).unwrap();
        assert_eq!(back.id, conn.id);
        assert_eq!(back.initiator_id, conn.initiator_id);
        assert_eq!(back.recipient_id, conn.recipient_id);
        assert_eq!(back.status, conn.status);
    }
}
