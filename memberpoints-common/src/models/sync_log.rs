use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Success,
    Failure,
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStatus::Success => write!(f, "success"),
            SyncStatus::Failure => write!(f, "failure"),
        }
    }
}

/// One spreadsheet sync run.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct SyncLog {
    pub sync_log_id: Uuid,
    pub sync_time: DateTime<Utc>,
    pub status: SyncStatus,
    pub message: Option<String>,
}

impl SyncLog {
    pub fn new(status: SyncStatus, message: &str) -> Self {
        Self {
            sync_log_id: Uuid::new_v4(),
            sync_time: Utc::now(),
            status,
            message: Some(message.to_string()).filter(|m| !m.is_empty()),
        }
    }
}
