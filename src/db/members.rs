use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CompanyMember, MemberProfile};

pub async fn create(
    pool: &PgPool,
    company_id: Uuid,
    user_id: Uuid,
    role: &str,
    status: &str,
    invited_by: Option<Uuid>,
) -> Result<CompanyMember, sqlx::Error> {
    sqlx::query_as::<_, CompanyMember>(
        "INSERT INTO company_members (company_id, user_id, role, status, invited_by)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(company_id)
    .bind(user_id)
    .bind(role)
    .bind(status)
    .bind(invited_by)
    .fetch_one(pool)
    .await
}

pub async fn find_active(
    pool: &PgPool,
    company_id: Uuid,
    user_id: Uuid,
) -> Result<Option<CompanyMember>, sqlx::Error> {
    sqlx::query_as::<_, CompanyMember>(
        "SELECT * FROM company_members
         WHERE company_id = $1 AND user_id = $2 AND status = 'active'",
    )
    .bind(company_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Flip a pending membership to active. Returns the updated row, or
/// `RowNotFound` if no pending membership exists.
pub async fn activate(
    pool: &PgPool,
    company_id: Uuid,
    user_id: Uuid,
) -> Result<CompanyMember, sqlx::Error> {
    sqlx::query_as::<_, CompanyMember>(
        "UPDATE company_members SET status = 'active'
         WHERE company_id = $1 AND user_id = $2 AND status = 'pending' RETURNING *",
    )
    .bind(company_id)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Active members joined with minimal public profile fields.
pub async fn list_profiles(
    pool: &PgPool,
    company_id: Uuid,
) -> Result<Vec<MemberProfile>, sqlx::Error> {
    sqlx::query_as::<_, MemberProfile>(
        "SELECT m.id, m.company_id, m.user_id, m.role, u.email, u.name, m.created_at
         FROM company_members m
         JOIN users u ON u.id = m.user_id
         WHERE m.company_id = $1 AND m.status = 'active'
         ORDER BY u.name",
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}
