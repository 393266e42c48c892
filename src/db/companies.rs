use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Company;

pub struct NewCompany<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub plan_id: &'a str,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub company_size: Option<&'a str>,
    pub industry: Option<&'a str>,
    pub created_by: Uuid,
}

pub async fn create(pool: &PgPool, company: &NewCompany<'_>) -> Result<Company, sqlx::Error> {
    sqlx::query_as::<_, Company>(
        "INSERT INTO companies (name, slug, plan_id, trial_ends_at, company_size, industry, created_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(company.name)
    .bind(company.slug)
    .bind(company.plan_id)
    .bind(company.trial_ends_at)
    .bind(company.company_size)
    .bind(company.industry)
    .bind(company.created_by)
    .fetch_one(pool)
    .await
}

/// Fallback insert used after a slug collision: only the essentials, column
/// defaults supply the rest.
pub async fn create_minimal(
    pool: &PgPool,
    name: &str,
    slug: &str,
    plan_id: &str,
    created_by: Uuid,
) -> Result<Company, sqlx::Error> {
    sqlx::query_as::<_, Company>(
        "INSERT INTO companies (name, slug, plan_id, created_by)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(name)
    .bind(slug)
    .bind(plan_id)
    .bind(created_by)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await
}

/// Companies the user holds an active membership in, newest first.
pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>(
        "SELECT c.* FROM companies c
         JOIN company_members m ON m.company_id = c.id
         WHERE m.user_id = $1 AND m.status = 'active'
         ORDER BY c.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
