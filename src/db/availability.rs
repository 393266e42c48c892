use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{AvailabilityEntry, MemberAvailability};

pub async fn create(
    pool: &PgPool,
    company_id: Uuid,
    user_id: Uuid,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    note: Option<&str>,
) -> Result<AvailabilityEntry, sqlx::Error> {
    sqlx::query_as::<_, AvailabilityEntry>(
        "INSERT INTO availability_entries (company_id, user_id, starts_at, ends_at, note)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(company_id)
    .bind(user_id)
    .bind(starts_at)
    .bind(ends_at)
    .bind(note)
    .fetch_one(pool)
    .await
}

/// Availability within a window joined with member names, ordered by the
/// joined name.
pub async fn list_window(
    pool: &PgPool,
    company_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<MemberAvailability>, sqlx::Error> {
    sqlx::query_as::<_, MemberAvailability>(
        "SELECT a.id, a.company_id, a.user_id, u.name AS user_name, a.starts_at, a.ends_at, a.note
         FROM availability_entries a
         JOIN users u ON u.id = a.user_id
         WHERE a.company_id = $1 AND a.starts_at >= $2 AND a.ends_at <= $3
         ORDER BY u.name",
    )
    .bind(company_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}
