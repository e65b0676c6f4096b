//! Admin user account

use serde::{Deserialize, Serialize};

/// Back-office admin account, as returned by /auth/login and /auth/me.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub last_login: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
