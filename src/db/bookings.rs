use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::RoomBooking;

/// No overlap or conflict check: two bookings for the same room and window
/// both insert successfully.
pub async fn create(
    pool: &PgPool,
    company_id: Uuid,
    room_name: &str,
    title: &str,
    booked_by: Uuid,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    notes: Option<&str>,
) -> Result<RoomBooking, sqlx::Error> {
    sqlx::query_as::<_, RoomBooking>(
        "INSERT INTO room_bookings (company_id, room_name, title, booked_by, starts_at, ends_at, notes)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(company_id)
    .bind(room_name)
    .bind(title)
    .bind(booked_by)
    .bind(starts_at)
    .bind(ends_at)
    .bind(notes)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &PgPool, company_id: Uuid) -> Result<Vec<RoomBooking>, sqlx::Error> {
    sqlx::query_as::<_, RoomBooking>(
        "SELECT * FROM room_bookings WHERE company_id = $1 ORDER BY starts_at",
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}
