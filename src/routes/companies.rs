use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::Company;
use crate::provisioning::{self, ProvisionOutcome, ProvisionRequest};
use crate::scope::CompanyScope;
use crate::state::SharedState;

/// Create a new company workspace for the authenticated user.
pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<ProvisionRequest>,
) -> Result<Json<ProvisionOutcome>, AppError> {
    let outcome =
        provisioning::provision(&state.pool, auth.user_id, state.config.trial_days, &req).await?;

    db::audit::record(
        &state.pool,
        outcome.company.id,
        Some(auth.user_id),
        "company.provisioned",
        "company",
        Some(outcome.company.id),
    )
    .await;

    Ok(Json(outcome))
}

/// Companies the caller holds an active membership in.
pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Company>>, AppError> {
    let companies = db::companies::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(companies))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<Company>, AppError> {
    let scope = CompanyScope::authorize(&state.pool, company_id, auth.user_id).await?;
    let company = db::companies::find_by_id(&state.pool, scope.company_id())
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;
    Ok(Json(company))
}
