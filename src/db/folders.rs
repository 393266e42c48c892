use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Folder;

pub async fn create(
    pool: &PgPool,
    company_id: Uuid,
    name: &str,
    created_by: Uuid,
) -> Result<Folder, sqlx::Error> {
    sqlx::query_as::<_, Folder>(
        "INSERT INTO folders (company_id, name, created_by) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(company_id)
    .bind(name)
    .bind(created_by)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &PgPool, company_id: Uuid) -> Result<Vec<Folder>, sqlx::Error> {
    sqlx::query_as::<_, Folder>(
        "SELECT * FROM folders WHERE company_id = $1 ORDER BY name",
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}
