use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::tasks::{NewTask, TaskFilter};
use crate::error::AppError;
use crate::models::Task;
use crate::scope::CompanyScope;
use crate::state::SharedState;

/// Unknown body fields, including a caller-supplied `company_id`, are
/// dropped by deserialization; the scope decides the tenant.
#[derive(Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub assignee_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(company_id): Path<Uuid>,
    Query(filter): Query<TaskFilter>,
) -> Result<Json<Vec<Task>>, AppError> {
    let scope = CompanyScope::authorize(&state.pool, company_id, auth.user_id).await?;
    let tasks = scope.list_tasks(&filter).await?;
    Ok(Json(tasks))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(company_id): Path<Uuid>,
    Json(req): Json<CreateTask>,
) -> Result<Json<Task>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let scope = CompanyScope::authorize(&state.pool, company_id, auth.user_id).await?;
    let task = scope
        .create_task(&NewTask {
            title: &req.title,
            description: req.description.as_deref(),
            status: req.status.as_deref(),
            assignee_id: req.assignee_id,
            due_date: req.due_date,
            created_by: auth.user_id,
        })
        .await?;

    db::audit::record(
        &state.pool,
        scope.company_id(),
        Some(auth.user_id),
        "task.created",
        "task",
        Some(task.id),
    )
    .await;

    Ok(Json(task))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path((company_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Task>, AppError> {
    let scope = CompanyScope::authorize(&state.pool, company_id, auth.user_id).await?;
    let task = scope.find_task(id).await?;
    Ok(Json(task))
}
