use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::CalendarEvent;

pub async fn create(
    pool: &PgPool,
    company_id: Uuid,
    title: &str,
    description: Option<&str>,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    created_by: Uuid,
) -> Result<CalendarEvent, sqlx::Error> {
    sqlx::query_as::<_, CalendarEvent>(
        "INSERT INTO calendar_events (company_id, title, description, starts_at, ends_at, created_by)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(company_id)
    .bind(title)
    .bind(description)
    .bind(starts_at)
    .bind(ends_at)
    .bind(created_by)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &PgPool, company_id: Uuid) -> Result<Vec<CalendarEvent>, sqlx::Error> {
    sqlx::query_as::<_, CalendarEvent>(
        "SELECT * FROM calendar_events WHERE company_id = $1 ORDER BY starts_at",
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}
