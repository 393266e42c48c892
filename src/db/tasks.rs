use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Task;

/// Enumerated filter options for task listing. Each field is applied
/// conjunctively when set; unknown filter keys cannot exist.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TaskFilter {
    pub status: Option<String>,
    pub assignee_id: Option<Uuid>,
}

pub struct NewTask<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: Option<&'a str>,
    pub assignee_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
    pub created_by: Uuid,
}

pub async fn list(
    pool: &PgPool,
    company_id: Uuid,
    filter: &TaskFilter,
) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "SELECT * FROM tasks
         WHERE company_id = $1
           AND ($2::text IS NULL OR status = $2)
           AND ($3::uuid IS NULL OR assignee_id = $3)
         ORDER BY created_at DESC",
    )
    .bind(company_id)
    .bind(filter.status.as_deref())
    .bind(filter.assignee_id)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    company_id: Uuid,
    task: &NewTask<'_>,
) -> Result<Task, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (company_id, title, description, status, assignee_id, due_date, created_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(company_id)
    .bind(task.title)
    .bind(task.description)
    .bind(task.status.unwrap_or("todo"))
    .bind(task.assignee_id)
    .bind(task.due_date)
    .bind(task.created_by)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    company_id: Uuid,
) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1 AND company_id = $2")
        .bind(id)
        .bind(company_id)
        .fetch_optional(pool)
        .await
}
