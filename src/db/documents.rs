use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Document;

pub struct NewDocument<'a> {
    pub folder_id: Option<Uuid>,
    pub name: &'a str,
    pub storage_path: &'a str,
    pub content_type: &'a str,
    pub size_bytes: i64,
    pub uploaded_by: Uuid,
}

pub async fn list(pool: &PgPool, company_id: Uuid) -> Result<Vec<Document>, sqlx::Error> {
    sqlx::query_as::<_, Document>(
        "SELECT * FROM documents WHERE company_id = $1 ORDER BY created_at DESC",
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    company_id: Uuid,
    doc: &NewDocument<'_>,
) -> Result<Document, sqlx::Error> {
    sqlx::query_as::<_, Document>(
        "INSERT INTO documents (company_id, folder_id, name, storage_path, content_type, size_bytes, uploaded_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(company_id)
    .bind(doc.folder_id)
    .bind(doc.name)
    .bind(doc.storage_path)
    .bind(doc.content_type)
    .bind(doc.size_bytes)
    .bind(doc.uploaded_by)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    company_id: Uuid,
) -> Result<Option<Document>, sqlx::Error> {
    sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1 AND company_id = $2")
        .bind(id)
        .bind(company_id)
        .fetch_optional(pool)
        .await
}
