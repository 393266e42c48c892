use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::CompanyInvitation;

pub async fn create(
    pool: &PgPool,
    company_id: Uuid,
    email: &str,
    role: &str,
    token: &str,
    invited_by: Uuid,
    expires_at: DateTime<Utc>,
) -> Result<CompanyInvitation, sqlx::Error> {
    sqlx::query_as::<_, CompanyInvitation>(
        "INSERT INTO company_invitations (company_id, email, role, token, invited_by, expires_at)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(company_id)
    .bind(email)
    .bind(role)
    .bind(token)
    .bind(invited_by)
    .bind(expires_at)
    .fetch_one(pool)
    .await
}

pub async fn find_by_token(
    pool: &PgPool,
    token: &str,
) -> Result<Option<CompanyInvitation>, sqlx::Error> {
    sqlx::query_as::<_, CompanyInvitation>(
        "SELECT * FROM company_invitations WHERE token = $1 AND expires_at > now()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM company_invitations WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn list(pool: &PgPool, company_id: Uuid) -> Result<Vec<CompanyInvitation>, sqlx::Error> {
    sqlx::query_as::<_, CompanyInvitation>(
        "SELECT * FROM company_invitations WHERE company_id = $1 ORDER BY created_at DESC",
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}
