//! Site-user profile rows created by the auth provider's signup flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-user profile row. The auth provider owns account creation; this
/// API only reads the role for admin checks.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    /// Auth-provider user id (opaque UUID string)
    pub id: String,
    /// Either "user" or "admin"
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}
