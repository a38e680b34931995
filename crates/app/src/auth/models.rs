//! Auth data models.

use jiff::{SignedDuration, Timestamp};

use crate::{
    domain::users::records::{Role, UserRecord, UserUuid},
    uuids::TypedUuid,
};

/// Marker for session identifiers.
#[derive(Debug)]
pub struct Session;

/// Session UUID
pub type SessionUuid = TypedUuid<Session>;

/// The authenticated caller behind a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_uuid: UserUuid,
    pub role: Role,
    pub session_uuid: SessionUuid,
}

impl Principal {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Session row joined with the owning user's current role and status.
#[derive(Debug, Clone)]
pub(crate) struct SessionRecord {
    pub uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub role: Role,
    pub user_is_active: bool,
    pub access_hash: String,
    pub refresh_hash: String,
    pub access_expires_at: Timestamp,
    pub refresh_expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
}

/// Stored credentials used during login and password changes.
#[derive(Debug, Clone)]
pub(crate) struct Credentials {
    pub user: UserRecord,
    pub password_hash: String,
}

/// Token pair handed to the client. The raw tokens are only ever shown once.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub session_uuid: SessionUuid,
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: Timestamp,
    pub refresh_expires_at: Timestamp,
}

/// A user together with a freshly issued session.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: UserRecord,
    pub session: IssuedSession,
}

/// Self-service sign-up payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub role: Role,
}

/// Bootstrap admin payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Token lifetimes.
#[derive(Debug, Clone, Copy)]
pub struct TokenSettings {
    pub access_ttl: SignedDuration,
    pub refresh_ttl: SignedDuration,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            access_ttl: SignedDuration::from_mins(15),
            refresh_ttl: SignedDuration::from_hours(24 * 7),
        }
    }
}
