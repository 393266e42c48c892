use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::RoomBooking;
use crate::routes::timeslot;
use crate::scope::CompanyScope;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateBooking {
    pub room_name: String,
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub notes: Option<String>,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<Vec<RoomBooking>>, AppError> {
    let scope = CompanyScope::authorize(&state.pool, company_id, auth.user_id).await?;
    let bookings = db::bookings::list(&state.pool, scope.company_id()).await?;
    Ok(Json(bookings))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(company_id): Path<Uuid>,
    Json(req): Json<CreateBooking>,
) -> Result<Json<RoomBooking>, AppError> {
    let scope = CompanyScope::authorize(&state.pool, company_id, auth.user_id).await?;

    let (starts_at, ends_at) = timeslot::parse_window(&req.date, &req.start_time, &req.end_time)?;

    let booking = db::bookings::create(
        &state.pool,
        scope.company_id(),
        &req.room_name,
        &req.title,
        auth.user_id,
        starts_at,
        ends_at,
        req.notes.as_deref(),
    )
    .await?;

    db::audit::record(
        &state.pool,
        scope.company_id(),
        Some(auth.user_id),
        "booking.created",
        "booking",
        Some(booking.id),
    )
    .await;

    Ok(Json(booking))
}
