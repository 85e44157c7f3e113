//! Type-safe ID generation and management
//!
//! This module provides a generic, type-safe ID system with consistent prefixes
//! and UUID-based uniqueness guarantees. User IDs are issued by the external
//! authentication layer; everything else is generated here.

use compact_str::CompactString;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::str::FromStr;
use surrealdb::RecordId;
use uuid::Uuid;

use crate::db::strip_brackets;

/// A type-safe ID with a consistent prefix and UUID
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    /// The unique identifier
    uuid: Uuid,
    /// Phantom data to make each ID type unique
    _phantom: PhantomData<T>,
}

impl<T: IdType> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", T::PREFIX, self.uuid)
    }
}

/// Trait for types that can be used as ID markers
pub trait IdType: Send + Sync + 'static {
    /// The prefix for this ID type (e.g., "user" for users, "conn" for
    /// connections). Doubles as the table name for the record.
    const PREFIX: &'static str;
}

/// Errors that can occur when working with IDs
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum IdError {
    #[error("Invalid ID format: expected prefix '{expected}', got '{actual}'")]
    #[diagnostic(help("Ensure the ID starts with the correct prefix followed by an underscore"))]
    InvalidPrefix { expected: String, actual: String },

    #[error("Invalid UUID: {0}")]
    #[diagnostic(help("The UUID portion of the ID must be a valid UUID v4 format"))]
    InvalidUuid(#[from] uuid::Error),

    #[error("Invalid ID format: {0}")]
    #[diagnostic(help(
        "IDs must be in the format 'prefix_uuid' where prefix matches the expected type"
    ))]
    InvalidFormat(String),
}

impl<T: IdType> Id<T> {
    /// Create a new ID with a generated UUID
    pub fn generate() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            _phantom: PhantomData,
        }
    }

    /// Create an ID from a specific UUID (useful for tests or when the
    /// identity comes from the authentication collaborator)
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _phantom: PhantomData,
        }
    }

    /// Parse an ID from a string
    pub fn parse(s: &str) -> Result<Self, IdError> {
        let parts: Vec<&str> = s.splitn(2, '_').collect();
        if parts.len() != 2 {
            return Err(IdError::InvalidFormat(
                "ID must be in format 'prefix_uuid'".to_string(),
            ));
        }

        let [prefix, uuid_str] = [parts[0], parts[1]];

        if prefix != T::PREFIX {
            return Err(IdError::InvalidPrefix {
                expected: T::PREFIX.to_string(),
                actual: prefix.to_string(),
            });
        }

        let uuid = Uuid::parse_str(uuid_str)?;

        Ok(Self {
            uuid,
            _phantom: PhantomData,
        })
    }

    /// Get the UUID part
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn from_record(record: RecordId) -> Result<Self, IdError> {
        Ok(Self::from_uuid(Uuid::from_str(strip_brackets(
            &record.key().to_string(),
        ))?))
    }

    /// Get the prefix for this ID type
    pub fn prefix(&self) -> &'static str {
        T::PREFIX
    }

    /// Convert to a compact string representation
    pub fn to_compact_string(&self) -> CompactString {
        compact_str::format_compact!("{}_{}", T::PREFIX, self.uuid)
    }

    /// Create a nil/empty ID (all zeros)
    pub fn nil() -> Self {
        Self {
            uuid: Uuid::nil(),
            _phantom: PhantomData,
        }
    }

    /// Check if this is a nil/empty ID
    pub fn is_nil(&self) -> bool {
        self.uuid.is_nil()
    }
}

impl<T: IdType> Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", T::PREFIX, self.uuid)
    }
}

impl<T: IdType> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<T: IdType> From<Id<T>> for String {
    fn from(id: Id<T>) -> Self {
        id.to_string()
    }
}

impl<T: IdType> AsRef<Uuid> for Id<T> {
    fn as_ref(&self) -> &Uuid {
        &self.uuid
    }
}

impl<T: IdType> From<Id<T>> for RecordId {
    fn from(id: Id<T>) -> Self {
        // Use just the UUID part as the key
        RecordId::from_table_key(T::PREFIX, id.uuid.to_string())
    }
}

impl<T: IdType> From<&Id<T>> for RecordId {
    fn from(id: &Id<T>) -> Self {
        // Use just the UUID part as the key
        RecordId::from_table_key(T::PREFIX, id.uuid.to_string())
    }
}

impl<T: IdType> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{}_{}", T::PREFIX, self.uuid()))
    }
}

impl<'de, T: IdType> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let visitor: Id<T> = Id::nil();
        deserializer.deserialize_str(visitor)
    }
}

impl<'de, T: IdType> Visitor<'de> for Id<T> {
    type Value = Id<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "A string with the format 'prefix_UUID'")
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let parts: Vec<&str> = s.splitn(2, '_').collect();
        if parts.len() != 2 {
            return Err(de::Error::custom(
                "ID must be in format 'prefix_uuid'".to_string(),
            ));
        }

        let [prefix, uuid_str] = [parts[0], parts[1]];

        if prefix != T::PREFIX {
            return Err(de::Error::custom(format!(
                "ID prefix must match type ({}), but was {}",
                T::PREFIX,
                prefix
            )));
        }

        let uuid = Uuid::parse_str(uuid_str).map_err(|e| {
            de::Error::custom(format!(
                "Second component of id must be a valid UUIDv4, but got error{}",
                e
            ))
        })?;

        Ok(Self {
            uuid,
            _phantom: PhantomData,
        })
    }
}

/// Macro to define new ID types with minimal boilerplate
#[macro_export]
macro_rules! define_id_type {
    ($type_name:ident, $prefix:expr) => {
        /// Marker type for the ID
        #[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
        pub struct $type_name;

        impl $crate::id::IdType for $type_name {
            const PREFIX: &'static str = $prefix;
        }
    };
}

// Define the domain's ID types using the macro
define_id_type!(UserIdType, "user");
define_id_type!(ConnectionIdType, "conn");
define_id_type!(MessageIdType, "msg");
define_id_type!(HackathonIdType, "hack");

/// Type alias for User IDs (issued by the authentication collaborator)
pub type UserId = Id<UserIdType>;

/// Type alias for Connection IDs
pub type ConnectionId = Id<ConnectionIdType>;

/// Type alias for Message IDs
pub type MessageId = Id<MessageIdType>;

/// Type alias for Hackathon IDs
pub type HackathonId = Id<HackathonIdType>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_generation() {
        let id1 = ConnectionId::generate();
        let id2 = ConnectionId::generate();

        // IDs should be unique
        assert_ne!(id1, id2);

        // IDs should have correct prefix
        assert_eq!(id1.prefix(), "conn");
        assert!(id2.to_string().starts_with("conn_"));
    }

    #[test]
    fn test_id_parsing() {
        let id = ConnectionId::generate();
        let id_str = id.to_string();

        // Should be able to parse back
        let parsed = ConnectionId::parse(&id_str).unwrap();
        assert_eq!(id, parsed);

        // Should fail with wrong prefix
        assert!(UserId::parse(&id_str).is_err());

        // Should fail with invalid format
        assert!(ConnectionId::parse("invalid").is_err());
        assert!(ConnectionId::parse("conn_").is_err());
        assert!(ConnectionId::parse("conn_not-a-uuid").is_err());

        // Should succeed with valid format
        let uuid = uuid::Uuid::new_v4();
        assert!(ConnectionId::parse(&format!("conn_{}", uuid)).is_ok());
    }

    #[test]
    fn test_id_serialization() {
        let id = UserId::generate();

        // JSON serialization
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);

        // Should serialize as "prefix_uuid"
        assert!(json.contains("user_"));
    }

    #[test]
    fn test_different_id_types() {
        let user_id = UserId::generate();
        let conn_id = ConnectionId::generate();
        let msg_id = MessageId::generate();
        let hack_id = HackathonId::generate();

        assert!(user_id.to_string().starts_with("user_"));
        assert!(conn_id.to_string().starts_with("conn_"));
        assert!(msg_id.to_string().starts_with("msg_"));
        assert!(hack_id.to_string().starts_with("hack_"));
    }

    #[test]
    fn test_nil_id() {
        let nil_id = UserId::nil();
        assert!(nil_id.is_nil());
        assert_eq!(
            nil_id.to_string(),
            "user_00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = UserId::from_uuid(uuid);
        assert_eq!(id.uuid(), uuid);
    }

    #[test]
    fn test_debug_output() {
        let user_id = UserId::generate();

        // Debug output should be clean, just "prefix_uuid"
        let debug = format!("{:?}", user_id);
        assert!(debug.starts_with("user_"));
        assert!(!debug.contains("PhantomData"));
        assert_eq!(debug, user_id.to_string());
    }
}
