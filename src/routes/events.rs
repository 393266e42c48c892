use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::CalendarEvent;
use crate::routes::timeslot;
use crate::scope::CompanyScope;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    let scope = CompanyScope::authorize(&state.pool, company_id, auth.user_id).await?;
    let events = db::events::list(&state.pool, scope.company_id()).await?;
    Ok(Json(events))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(company_id): Path<Uuid>,
    Json(req): Json<CreateEvent>,
) -> Result<Json<CalendarEvent>, AppError> {
    let scope = CompanyScope::authorize(&state.pool, company_id, auth.user_id).await?;

    let (starts_at, ends_at) = timeslot::parse_window(&req.date, &req.start_time, &req.end_time)?;

    let event = db::events::create(
        &state.pool,
        scope.company_id(),
        &req.title,
        req.description.as_deref(),
        starts_at,
        ends_at,
        auth.user_id,
    )
    .await?;

    db::audit::record(
        &state.pool,
        scope.company_id(),
        Some(auth.user_id),
        "event.created",
        "event",
        Some(event.id),
    )
    .await;

    Ok(Json(event))
}
