use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered member. Points are never stored here; see `LedgerTotals`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, sqlx::FromRow)]
pub struct Member {
    pub member_id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub is_superuser: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub fn new(username: &str, email: Option<&str>) -> Self {
        Self {
            member_id: Uuid::new_v4(),
            username: username.trim().to_string(),
            email: email
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(String::from),
            display_name: None,
            is_superuser: false,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
