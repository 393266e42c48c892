use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Denormalized snapshot of the company a user is currently working in.
/// Not authoritative: the `companies` row can move on without it.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ActiveCompany {
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub slug: String,
    pub role: String,
    pub updated_at: DateTime<Utc>,
}
