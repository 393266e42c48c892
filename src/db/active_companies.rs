use sqlx::PgPool;
use uuid::Uuid;

use crate::models::ActiveCompany;

/// Set or replace the user's active-company snapshot.
pub async fn upsert(
    pool: &PgPool,
    user_id: Uuid,
    company_id: Uuid,
    name: &str,
    slug: &str,
    role: &str,
) -> Result<ActiveCompany, sqlx::Error> {
    sqlx::query_as::<_, ActiveCompany>(
        "INSERT INTO active_companies (user_id, company_id, name, slug, role)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (user_id) DO UPDATE
         SET company_id = $2, name = $3, slug = $4, role = $5, updated_at = now()
         RETURNING *",
    )
    .bind(user_id)
    .bind(company_id)
    .bind(name)
    .bind(slug)
    .bind(role)
    .fetch_one(pool)
    .await
}

pub async fn find(pool: &PgPool, user_id: Uuid) -> Result<Option<ActiveCompany>, sqlx::Error> {
    sqlx::query_as::<_, ActiveCompany>("SELECT * FROM active_companies WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn clear(pool: &PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM active_companies WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}
