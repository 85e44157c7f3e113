//! Database schema definitions for Hackmate
//!
//! Table names match the ID prefixes in [`crate::id`], so a typed ID converts
//! directly into a record pointer for its table.

/// Profiles are keyed by the owning user's UUID, not a generated ID
pub const PROFILE_TABLE: &str = "profile";

/// SQL schema definitions for the database
pub struct Schema;

impl Schema {
    /// Get all table definitions
    pub fn tables() -> Vec<TableDefinition> {
        vec![
            Self::system_metadata(),
            Self::profiles(),
            Self::hackathons(),
            Self::connections(),
            Self::messages(),
        ]
    }

    /// System metadata table
    pub fn system_metadata() -> TableDefinition {
        TableDefinition {
            name: "system_metadata".to_string(),
            schema: r#"
                DEFINE TABLE system_metadata SCHEMAFULL;
                DEFINE FIELD schema_version ON system_metadata TYPE int;
                DEFINE FIELD created_at ON system_metadata TYPE datetime;
                DEFINE FIELD updated_at ON system_metadata TYPE datetime;
            "#
            .to_string(),
            indexes: vec![],
        }
    }

    /// Profiles table, one row per authenticated user
    pub fn profiles() -> TableDefinition {
        TableDefinition {
            name: PROFILE_TABLE.to_string(),
            schema: r#"
                DEFINE TABLE profile SCHEMAFULL;
                DEFINE FIELD user_id ON profile TYPE record;
                DEFINE FIELD full_name ON profile TYPE string;
                DEFINE FIELD avatar_url ON profile TYPE option<string>;
                DEFINE FIELD location ON profile TYPE option<string>;
                DEFINE FIELD timezone ON profile TYPE option<string>;
                DEFINE FIELD github_url ON profile TYPE option<string>;
                DEFINE FIELD linkedin_url ON profile TYPE option<string>;
                DEFINE FIELD website_url ON profile TYPE option<string>;
                DEFINE FIELD availability ON profile TYPE string
                    ASSERT $value INSIDE ['actively_looking', 'open', 'busy'];
                DEFINE FIELD skills ON profile FLEXIBLE TYPE array;
                DEFINE FIELD languages ON profile FLEXIBLE TYPE array;
                DEFINE FIELD interests ON profile FLEXIBLE TYPE array;
                DEFINE FIELD created_at ON profile TYPE datetime;
                DEFINE FIELD updated_at ON profile TYPE datetime;
            "#
            .to_string(),
            indexes: vec![
                "DEFINE INDEX profile_user_idx ON profile FIELDS user_id UNIQUE".to_string(),
            ],
        }
    }

    /// Hackathon listings table
    pub fn hackathons() -> TableDefinition {
        TableDefinition {
            name: "hack".to_string(),
            schema: r#"
                DEFINE TABLE hack SCHEMAFULL;
                DEFINE FIELD owner_id ON hack TYPE record;
                DEFINE FIELD title ON hack TYPE string;
                DEFINE FIELD description ON hack TYPE string;
                DEFINE FIELD start_date ON hack TYPE datetime;
                DEFINE FIELD end_date ON hack TYPE datetime;
                DEFINE FIELD format ON hack TYPE string
                    ASSERT $value INSIDE ['online', 'in_person', 'hybrid'];
                DEFINE FIELD location ON hack TYPE option<string>;
                DEFINE FIELD theme ON hack TYPE option<string>;
                DEFINE FIELD max_team_size ON hack TYPE int;
                DEFINE FIELD created_at ON hack TYPE datetime;
            "#
            .to_string(),
            indexes: vec![
                "DEFINE INDEX hack_owner_idx ON hack FIELDS owner_id".to_string(),
                "DEFINE INDEX hack_start_idx ON hack FIELDS start_date".to_string(),
            ],
        }
    }

    /// Connections table.
    ///
    /// The UNIQUE index over `pair_key` is what makes duplicate and
    /// reciprocal requests race-safe: of two concurrent inserts for the same
    /// unordered pair, exactly one lands.
    pub fn connections() -> TableDefinition {
        TableDefinition {
            name: "conn".to_string(),
            schema: r#"
                DEFINE TABLE conn SCHEMAFULL;
                DEFINE FIELD pair_key ON conn TYPE string;
                DEFINE FIELD initiator_id ON conn TYPE record;
                DEFINE FIELD recipient_id ON conn TYPE record;
                DEFINE FIELD status ON conn TYPE string
                    ASSERT $value INSIDE ['pending', 'accepted', 'rejected'];
                DEFINE FIELD created_at ON conn TYPE datetime;
                DEFINE FIELD updated_at ON conn TYPE datetime;
            "#
            .to_string(),
            indexes: vec![
                "DEFINE INDEX conn_pair_idx ON conn FIELDS pair_key UNIQUE".to_string(),
                "DEFINE INDEX conn_initiator_idx ON conn FIELDS initiator_id".to_string(),
                "DEFINE INDEX conn_recipient_idx ON conn FIELDS recipient_id".to_string(),
            ],
        }
    }

    /// Messages table
    pub fn messages() -> TableDefinition {
        TableDefinition {
            name: "msg".to_string(),
            schema: r#"
                DEFINE TABLE msg SCHEMAFULL;
                DEFINE FIELD connection_id ON msg TYPE record;
                DEFINE FIELD sender_id ON msg TYPE record;
                DEFINE FIELD content ON msg TYPE string;
                DEFINE FIELD read ON msg TYPE bool DEFAULT false;
                DEFINE FIELD created_at ON msg TYPE datetime;
            "#
            .to_string(),
            indexes: vec![
                "DEFINE INDEX msg_connection_idx ON msg FIELDS connection_id".to_string(),
                "DEFINE INDEX msg_created_idx ON msg FIELDS connection_id, created_at".to_string(),
                "DEFINE INDEX msg_unread_idx ON msg FIELDS connection_id, read".to_string(),
            ],
        }
    }
}

/// Table definition with schema and indexes
#[derive(Debug, Clone)]
pub struct TableDefinition {
    pub name: String,
    pub schema: String,
    pub indexes: Vec<String>,
}
