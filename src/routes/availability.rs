use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::{AvailabilityEntry, MemberAvailability};
use crate::routes::timeslot;
use crate::scope::CompanyScope;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateAvailability {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub note: Option<String>,
}

/// The lookup form sends the same date + time-of-day fields as the create
/// form; they bound the window of the select.
#[derive(Deserialize)]
pub struct AvailabilityWindow {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

/// Who is available in the requested window, ordered by member name.
pub async fn lookup(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(company_id): Path<Uuid>,
    Query(window): Query<AvailabilityWindow>,
) -> Result<Json<Vec<MemberAvailability>>, AppError> {
    let scope = CompanyScope::authorize(&state.pool, company_id, auth.user_id).await?;

    let (from, to) =
        timeslot::parse_window(&window.date, &window.start_time, &window.end_time)?;

    let entries = db::availability::list_window(&state.pool, scope.company_id(), from, to).await?;
    Ok(Json(entries))
}

/// Record the caller's own availability.
pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(company_id): Path<Uuid>,
    Json(req): Json<CreateAvailability>,
) -> Result<Json<AvailabilityEntry>, AppError> {
    let scope = CompanyScope::authorize(&state.pool, company_id, auth.user_id).await?;

    let (starts_at, ends_at) = timeslot::parse_window(&req.date, &req.start_time, &req.end_time)?;

    let entry = db::availability::create(
        &state.pool,
        scope.company_id(),
        auth.user_id,
        starts_at,
        ends_at,
        req.note.as_deref(),
    )
    .await?;

    Ok(Json(entry))
}
