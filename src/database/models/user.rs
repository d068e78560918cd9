use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const ROLE_ADMIN: &str = "admin";

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Bcrypt hash; never leaves the server.
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_never_serializes() {
        let user = User {
            id: Uuid::nil(),
            email: "admin@example.com".into(),
            password: "$2b$12$secret-hash".into(),
            name: "Administrator".into(),
            role: "admin".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "admin@example.com");
        assert!(user.is_admin());
    }
}
