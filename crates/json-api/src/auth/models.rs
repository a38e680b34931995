//! Auth Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use expresskart_app::auth::{AuthenticatedUser, IssuedSession};

use crate::users::models::UserResponse;

/// Tokens for a session. The raw values are only returned here.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    pub session_uuid: Uuid,
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: String,
    pub refresh_expires_at: String,
}

impl From<IssuedSession> for SessionResponse {
    fn from(session: IssuedSession) -> Self {
        SessionResponse {
            session_uuid: session.session_uuid.into(),
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            access_expires_at: session.access_expires_at.to_string(),
            refresh_expires_at: session.refresh_expires_at.to_string(),
        }
    }
}

/// Signed-in user and their new session.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuthResponse {
    pub user: UserResponse,
    pub session: SessionResponse,
}

impl From<AuthenticatedUser> for AuthResponse {
    fn from(authenticated: AuthenticatedUser) -> Self {
        AuthResponse {
            user: authenticated.user.into(),
            session: authenticated.session.into(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;

    use expresskart_app::{
        auth::{AuthenticatedUser, IssuedSession, SessionUuid},
        domain::users::records::{Role, UserRecord},
    };

    use crate::test_helpers::TEST_USER_UUID;

    pub(crate) fn make_session() -> IssuedSession {
        IssuedSession {
            session_uuid: SessionUuid::new(),
            access_token: "eka_v1_access".to_string(),
            refresh_token: "ekr_v1_refresh".to_string(),
            access_expires_at: Timestamp::UNIX_EPOCH,
            refresh_expires_at: Timestamp::UNIX_EPOCH,
        }
    }

    pub(crate) fn make_authenticated(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            user: UserRecord {
                uuid: TEST_USER_UUID,
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                role,
                phone: None,
                is_active: true,
                is_email_verified: false,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
            session: make_session(),
        }
    }
}
