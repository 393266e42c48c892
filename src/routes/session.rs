use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::ActiveCompany;
use crate::scope::CompanyScope;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SwitchCompany {
    pub company_id: Uuid,
}

/// The caller's active-company snapshot. It can lag the authoritative
/// company row; switching refreshes it.
pub async fn get_active(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<ActiveCompany>, AppError> {
    let snapshot = db::active_companies::find(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No active company selected".to_string()))?;
    Ok(Json(snapshot))
}

/// Switch tenants: verify membership, then rebuild the snapshot from the
/// authoritative company row.
pub async fn switch(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<SwitchCompany>,
) -> Result<Json<ActiveCompany>, AppError> {
    let scope = CompanyScope::authorize(&state.pool, req.company_id, auth.user_id).await?;

    let company = db::companies::find_by_id(&state.pool, scope.company_id())
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

    let snapshot = db::active_companies::upsert(
        &state.pool,
        auth.user_id,
        company.id,
        &company.name,
        &company.slug,
        scope.role(),
    )
    .await?;

    Ok(Json(snapshot))
}
