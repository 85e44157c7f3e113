//! Database operations - direct, simple, no unnecessary abstractions
//!
//! This extension trait is the sole authority for creating and transitioning
//! connection records; every operation is a single round trip against the
//! store. Race safety comes from the store, not from in-process locking: the
//! UNIQUE `pair_key` index arbitrates duplicate requests and the status
//! update is a compare-and-swap on `status = 'pending'`.

use surrealdb::RecordId;

use super::models::*;
use super::DatabaseError;
use crate::connection::{Connection, ConnectionStatus, ResponseDecision};
use crate::error::{CoreError, Result};
use crate::hackathon::Hackathon;
use crate::id::{
    ConnectionId, ConnectionIdType, HackathonId, HackathonIdType, IdType, MessageId,
    MessageIdType, UserId,
};
use crate::message::{self, Message};
use crate::pair::PairKey;
use crate::profile::{Profile, ProfileFilter};

/// True if the error is the UNIQUE pair index rejecting an insert
fn is_pair_conflict(err: &surrealdb::Error) -> bool {
    err.to_string().contains("conn_pair_idx")
}

pub trait SurrealExt<C> {
    // ===== Profile Operations =====

    fn create_profile(&self, profile: Profile) -> impl Future<Output = Result<Profile>>;

    fn get_profile(&self, user_id: UserId) -> impl Future<Output = Result<Option<Profile>>>;

    fn update_profile(&self, profile: Profile) -> impl Future<Output = Result<Profile>>;

    fn search_profiles(&self, filter: ProfileFilter) -> impl Future<Output = Result<Vec<Profile>>>;

    // ===== Hackathon Operations =====

    fn create_hackathon(&self, hackathon: Hackathon) -> impl Future<Output = Result<Hackathon>>;

    fn get_hackathon(&self, id: HackathonId) -> impl Future<Output = Result<Option<Hackathon>>>;

    fn list_hackathons(&self) -> impl Future<Output = Result<Vec<Hackathon>>>;

    // ===== Connection Lifecycle =====

    fn request_connection(
        &self,
        initiator: UserId,
        recipient: UserId,
    ) -> impl Future<Output = Result<Connection>>;

    fn respond_to_connection(
        &self,
        connection_id: ConnectionId,
        responder: UserId,
        decision: ResponseDecision,
    ) -> impl Future<Output = Result<Connection>>;

    fn find_connection(
        &self,
        a: UserId,
        b: UserId,
    ) -> impl Future<Output = Result<Option<Connection>>>;

    fn list_connections(
        &self,
        user: UserId,
        status: Option<ConnectionStatus>,
    ) -> impl Future<Output = Result<Vec<Connection>>>;

    // ===== Conversation Gate and Messages =====

    fn can_message(
        &self,
        connection_id: ConnectionId,
        actor: UserId,
    ) -> impl Future<Output = Result<bool>>;

    fn send_message(
        &self,
        connection_id: ConnectionId,
        sender: UserId,
        content: String,
    ) -> impl Future<Output = Result<Message>>;

    fn list_messages(
        &self,
        connection_id: ConnectionId,
    ) -> impl Future<Output = Result<Vec<Message>>>;

    fn mark_messages_read(
        &self,
        connection_id: ConnectionId,
        reader: UserId,
    ) -> impl Future<Output = Result<usize>>;

    fn unread_count(
        &self,
        connection_id: ConnectionId,
        user: UserId,
    ) -> impl Future<Output = Result<usize>>;
}

impl<T, C> SurrealExt<C> for T
where
    T: AsRef<surrealdb::Surreal<C>>,
    C: surrealdb::Connection,
{
    // ===== Profile Operations =====

    /// Create a profile for a user, keyed by their identity
    async fn create_profile(&self, mut profile: Profile) -> Result<Profile> {
        if profile.user_id.is_nil() {
            return Err(CoreError::invalid_identity(profile.user_id));
        }

        let now = chrono::Utc::now();
        profile.created_at = now;
        profile.updated_at = now;

        let key = profile.user_id.uuid().to_string();
        let db_profile = DbProfile::from(profile);

        let created: Option<DbProfile> = self
            .as_ref()
            .create((crate::db::schema::PROFILE_TABLE, key))
            .content(db_profile)
            .await
            .map_err(|e| DatabaseError::QueryFailed(e))?;

        created
            .map(|db| {
                db.try_into()
                    .map_err(|_| DatabaseError::Other("Failed to parse profile".into()).into())
            })
            .ok_or_else(|| CoreError::from(DatabaseError::Other("Failed to create profile".into())))?
    }

    /// Get a profile by the owning user's ID
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>> {
        let db_profile: Option<DbProfile> = self
            .as_ref()
            .select((crate::db::schema::PROFILE_TABLE, user_id.uuid().to_string()))
            .await
            .map_err(|e| DatabaseError::QueryFailed(e))?;

        Ok(db_profile.and_then(|db| db.try_into().ok()))
    }

    /// Replace a profile's contents, bumping `updated_at`
    async fn update_profile(&self, mut profile: Profile) -> Result<Profile> {
        profile.updated_at = chrono::Utc::now();

        let key = profile.user_id.uuid().to_string();
        let user_id = profile.user_id;
        let db_profile = DbProfile::from(profile);

        let updated: Option<DbProfile> = self
            .as_ref()
            .update((crate::db::schema::PROFILE_TABLE, key))
            .content(db_profile)
            .await
            .map_err(|e| DatabaseError::QueryFailed(e))?;

        updated
            .map(|db| {
                db.try_into()
                    .map_err(|_| DatabaseError::Other("Failed to parse profile".into()).into())
            })
            .ok_or_else(|| CoreError::not_found("Profile", user_id))?
    }

    /// Teammate search. Fetches the profile table and applies the filter to
    /// the rows, the same shape the search screen applies.
    async fn search_profiles(&self, filter: ProfileFilter) -> Result<Vec<Profile>> {
        let db_profiles: Vec<DbProfile> = self
            .as_ref()
            .select(crate::db::schema::PROFILE_TABLE)
            .await
            .map_err(|e| DatabaseError::QueryFailed(e))?;

        let profiles = db_profiles
            .into_iter()
            .filter_map(|db| Profile::try_from(db).ok())
            .filter(|profile| filter.matches(profile))
            .collect();

        Ok(profiles)
    }

    // ===== Hackathon Operations =====

    /// Create a hackathon listing
    async fn create_hackathon(&self, hackathon: Hackathon) -> Result<Hackathon> {
        hackathon.validate()?;

        let key = hackathon.id.uuid().to_string();
        let db_hackathon = DbHackathon::from(hackathon);

        let created: Option<DbHackathon> = self
            .as_ref()
            .create((HackathonIdType::PREFIX, key))
            .content(db_hackathon)
            .await
            .map_err(|e| DatabaseError::QueryFailed(e))?;

        created
            .map(|db| {
                db.try_into()
                    .map_err(|_| DatabaseError::Other("Failed to parse hackathon".into()).into())
            })
            .ok_or_else(|| {
                CoreError::from(DatabaseError::Other("Failed to create hackathon".into()))
            })?
    }

    /// Get a hackathon by ID
    async fn get_hackathon(&self, id: HackathonId) -> Result<Option<Hackathon>> {
        let db_hackathon: Option<DbHackathon> = self
            .as_ref()
            .select((HackathonIdType::PREFIX, id.uuid().to_string()))
            .await
            .map_err(|e| DatabaseError::QueryFailed(e))?;

        Ok(db_hackathon.and_then(|db| db.try_into().ok()))
    }

    /// All hackathons, soonest first
    async fn list_hackathons(&self) -> Result<Vec<Hackathon>> {
        let query = format!(
            "SELECT * FROM {} ORDER BY start_date ASC",
            HackathonIdType::PREFIX
        );

        let db_hackathons: Vec<DbHackathon> = self
            .as_ref()
            .query(&query)
            .await
            .map_err(|e| DatabaseError::QueryFailed(e))?
            .take(0)
            .map_err(|e| DatabaseError::QueryFailed(e))?;

        db_hackathons
            .into_iter()
            .map(|db| {
                db.try_into()
                    .map_err(|_| DatabaseError::Other("Failed to parse hackathon".into()).into())
            })
            .collect()
    }

    // ===== Connection Lifecycle =====

    /// Send a connection request from `initiator` to `recipient`.
    ///
    /// Fails fast if a record for the normalized pair already exists in any
    /// status; the UNIQUE index catches the remaining insert race, so of two
    /// users requesting each other concurrently exactly one succeeds.
    async fn request_connection(&self, initiator: UserId, recipient: UserId) -> Result<Connection> {
        let pair = PairKey::new(initiator, recipient)?;

        if let Some(existing) = self.find_connection(initiator, recipient).await? {
            return Err(CoreError::DuplicateConnection {
                initiator_id: initiator,
                recipient_id: recipient,
                status: existing.status,
            });
        }

        let id = ConnectionId::generate();
        let now = chrono::Utc::now();
        let connection = Connection {
            id,
            initiator_id: initiator,
            recipient_id: recipient,
            status: ConnectionStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let created: Option<DbConnection> = match self
            .as_ref()
            .create((ConnectionIdType::PREFIX, id.uuid().to_string()))
            .content(DbConnection::from(connection))
            .await
        {
            Ok(created) => created,
            Err(e) if is_pair_conflict(&e) => {
                // Lost the insert race; report whatever status won
                let status = self
                    .find_connection(pair.lo(), pair.hi())
                    .await?
                    .map(|c| c.status)
                    .unwrap_or(ConnectionStatus::Pending);
                return Err(CoreError::DuplicateConnection {
                    initiator_id: initiator,
                    recipient_id: recipient,
                    status,
                });
            }
            Err(e) => return Err(DatabaseError::QueryFailed(e).into()),
        };

        created
            .map(|db| {
                db.try_into()
                    .map_err(|_| DatabaseError::Other("Failed to parse connection".into()).into())
            })
            .ok_or_else(|| {
                CoreError::from(DatabaseError::Other("Failed to create connection".into()))
            })?
    }

    /// Accept or reject a pending request. Only the recipient may respond,
    /// and only while the record is still pending.
    async fn respond_to_connection(
        &self,
        connection_id: ConnectionId,
        responder: UserId,
        decision: ResponseDecision,
    ) -> Result<Connection> {
        let db_conn: Option<DbConnection> = self
            .as_ref()
            .select((ConnectionIdType::PREFIX, connection_id.uuid().to_string()))
            .await
            .map_err(|e| DatabaseError::QueryFailed(e))?;

        let connection: Connection = db_conn
            .ok_or_else(|| CoreError::not_found("Connection", connection_id))?
            .try_into()
            .map_err(|_| DatabaseError::Other("Failed to parse connection".into()))?;

        if !connection.may_respond(responder) {
            return Err(CoreError::unauthorized(
                responder,
                "respond to this connection request",
            ));
        }

        if connection.status.is_terminal() {
            return Err(CoreError::InvalidTransition {
                connection_id,
                current: connection.status,
            });
        }

        // Compare-and-swap on the pending status: of two concurrent
        // responses exactly one matches the WHERE clause and wins.
        let updated: Vec<DbConnection> = self
            .as_ref()
            .query(
                "UPDATE $conn SET status = $status, updated_at = time::now() \
                 WHERE status = 'pending' RETURN AFTER",
            )
            .bind(("conn", RecordId::from(connection_id)))
            .bind(("status", decision.target_status()))
            .await
            .map_err(|e| DatabaseError::QueryFailed(e))?
            .take(0)
            .map_err(|e| DatabaseError::QueryFailed(e))?;

        match updated.into_iter().next() {
            Some(db) => Ok(db
                .try_into()
                .map_err(|_| DatabaseError::Other("Failed to parse connection".into()))?),
            None => {
                // Lost the response race; re-read for the winning status
                let db_conn: Option<DbConnection> = self
                    .as_ref()
                    .select((ConnectionIdType::PREFIX, connection_id.uuid().to_string()))
                    .await
                    .map_err(|e| DatabaseError::QueryFailed(e))?;
                match db_conn.and_then(|db| Connection::try_from(db).ok()) {
                    Some(current) => Err(CoreError::InvalidTransition {
                        connection_id,
                        current: current.status,
                    }),
                    None => Err(CoreError::not_found("Connection", connection_id)),
                }
            }
        }
    }

    /// Look up the connection between two users, regardless of direction
    async fn find_connection(&self, a: UserId, b: UserId) -> Result<Option<Connection>> {
        let pair = PairKey::new(a, b)?;

        let query = format!(
            "SELECT * FROM {} WHERE pair_key = $pair LIMIT 1",
            ConnectionIdType::PREFIX
        );

        let db_conns: Vec<DbConnection> = self
            .as_ref()
            .query(&query)
            .bind(("pair", pair.to_string()))
            .await
            .map_err(|e| DatabaseError::QueryFailed(e))?
            .take(0)
            .map_err(|e| DatabaseError::QueryFailed(e))?;

        Ok(db_conns.into_iter().next().and_then(|db| db.try_into().ok()))
    }

    /// All connections where `user` is a party, most recently updated first
    async fn list_connections(
        &self,
        user: UserId,
        status: Option<ConnectionStatus>,
    ) -> Result<Vec<Connection>> {
        let mut query = format!(
            "SELECT * FROM {} WHERE (initiator_id = $user OR recipient_id = $user)",
            ConnectionIdType::PREFIX
        );
        if status.is_some() {
            query.push_str(" AND status = $status");
        }
        query.push_str(" ORDER BY updated_at DESC");

        let mut request = self.as_ref().query(&query).bind(("user", RecordId::from(user)));
        if let Some(status) = status {
            request = request.bind(("status", status));
        }

        let db_conns: Vec<DbConnection> = request
            .await
            .map_err(|e| DatabaseError::QueryFailed(e))?
            .take(0)
            .map_err(|e| DatabaseError::QueryFailed(e))?;

        db_conns
            .into_iter()
            .map(|db| {
                db.try_into()
                    .map_err(|_| DatabaseError::Other("Failed to parse connection".into()).into())
            })
            .collect()
    }

    // ===== Conversation Gate and Messages =====

    /// True iff the connection exists, is accepted, and `actor` is a party.
    /// A pure predicate: unknown ids and strangers are `false`, never errors.
    async fn can_message(&self, connection_id: ConnectionId, actor: UserId) -> Result<bool> {
        let db_conn: Option<DbConnection> = self
            .as_ref()
            .select((ConnectionIdType::PREFIX, connection_id.uuid().to_string()))
            .await
            .map_err(|e| DatabaseError::QueryFailed(e))?;

        Ok(db_conn
            .and_then(|db| Connection::try_from(db).ok())
            .map(|conn| conn.status == ConnectionStatus::Accepted && conn.is_party(actor))
            .unwrap_or(false))
    }

    /// Insert a message after the conversation gate allows it
    async fn send_message(
        &self,
        connection_id: ConnectionId,
        sender: UserId,
        content: String,
    ) -> Result<Message> {
        message::validate_content(&content)?;

        if !self.can_message(connection_id, sender).await? {
            return Err(CoreError::unauthorized(
                sender,
                "send a message on this connection",
            ));
        }

        let msg = Message {
            id: MessageId::generate(),
            connection_id,
            sender_id: sender,
            content,
            read: false,
            created_at: chrono::Utc::now(),
        };
        let key = msg.id.uuid().to_string();

        let created: Option<DbMessage> = self
            .as_ref()
            .create((MessageIdType::PREFIX, key))
            .content(DbMessage::from(msg))
            .await
            .map_err(|e| DatabaseError::QueryFailed(e))?;

        created
            .map(|db| {
                db.try_into()
                    .map_err(|_| DatabaseError::Other("Failed to parse message".into()).into())
            })
            .ok_or_else(|| CoreError::from(DatabaseError::Other("Failed to create message".into())))?
    }

    /// Conversation history, oldest first
    async fn list_messages(&self, connection_id: ConnectionId) -> Result<Vec<Message>> {
        let query = format!(
            "SELECT * FROM {} WHERE connection_id = $conn ORDER BY created_at ASC",
            MessageIdType::PREFIX
        );

        let db_messages: Vec<DbMessage> = self
            .as_ref()
            .query(&query)
            .bind(("conn", RecordId::from(connection_id)))
            .await
            .map_err(|e| DatabaseError::QueryFailed(e))?
            .take(0)
            .map_err(|e| DatabaseError::QueryFailed(e))?;

        db_messages
            .into_iter()
            .map(|db| {
                db.try_into()
                    .map_err(|_| DatabaseError::Other("Failed to parse message".into()).into())
            })
            .collect()
    }

    /// Mark everything the other party sent as read. Returns how many
    /// messages changed.
    async fn mark_messages_read(
        &self,
        connection_id: ConnectionId,
        reader: UserId,
    ) -> Result<usize> {
        let query = format!(
            "UPDATE {} SET read = true \
             WHERE connection_id = $conn AND sender_id != $reader AND read = false \
             RETURN AFTER",
            MessageIdType::PREFIX
        );

        let updated: Vec<DbMessage> = self
            .as_ref()
            .query(&query)
            .bind(("conn", RecordId::from(connection_id)))
            .bind(("reader", RecordId::from(reader)))
            .await
            .map_err(|e| DatabaseError::QueryFailed(e))?
            .take(0)
            .map_err(|e| DatabaseError::QueryFailed(e))?;

        Ok(updated.len())
    }

    /// Unread messages waiting for `user` on this connection
    async fn unread_count(&self, connection_id: ConnectionId, user: UserId) -> Result<usize> {
        let query = format!(
            "SELECT count() FROM {} \
             WHERE connection_id = $conn AND sender_id != $user AND read = false \
             GROUP ALL",
            MessageIdType::PREFIX
        );

        #[derive(serde::Deserialize)]
        struct CountRow {
            count: usize,
        }

        let rows: Vec<CountRow> = self
            .as_ref()
            .query(&query)
            .bind(("conn", RecordId::from(connection_id)))
            .bind(("user", RecordId::from(user)))
            .await
            .map_err(|e| DatabaseError::QueryFailed(e))?
            .take(0)
            .map_err(|e| DatabaseError::QueryFailed(e))?;

        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }
}
