//! Users Data

/// Admin-side user update.
#[derive(Debug, Clone, PartialEq)]
pub struct UserUpdate {
    pub name: String,
    pub phone: Option<String>,
    pub is_email_verified: bool,
}

/// Self-service profile update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub name: String,
    pub phone: Option<String>,
}
