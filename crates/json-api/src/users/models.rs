//! User Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use expresskart_app::domain::users::records::{Role, UserRecord};

use crate::extensions::*;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,

    /// `user`, `vendor` or `admin`
    pub role: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub is_email_verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            phone: user.phone,
            is_active: user.is_active,
            is_email_verified: user.is_email_verified,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    pub count: usize,
    pub users: Vec<UserResponse>,
}

impl From<Vec<UserRecord>> for UsersResponse {
    fn from(users: Vec<UserRecord>) -> Self {
        UsersResponse {
            count: users.len(),
            users: users.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parse a role taken from a request.
pub(crate) fn parse_role(value: &str) -> Result<Role, salvo::http::StatusError> {
    value.parse::<Role>().or_400("invalid role")
}
