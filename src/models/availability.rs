use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    pub id: Uuid,
    pub company_id: Uuid,
    pub user_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Availability entry joined with the member's name, ordered by that name.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct MemberAvailability {
    pub id: Uuid,
    pub company_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub note: Option<String>,
}
