use serde::Serialize;
use sqlx::FromRow;

/// Row of the `admins` table, including the password hash
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Public view of an admin; never carries the hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminProfile {
    pub id: i32,
    pub username: String,
    pub email: String,
}

impl From<Admin> for AdminProfile {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username,
            email: admin.email,
        }
    }
}

/// Insert payload; `password_hash` is already bcrypt'd
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
