use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::MemberProfile;
use crate::scope::{CompanyScope, InviteOutcome};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct InviteMember {
    pub email: String,
    pub role: Option<String>,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<Vec<MemberProfile>>, AppError> {
    let scope = CompanyScope::authorize(&state.pool, company_id, auth.user_id).await?;
    let members = scope.list_members().await?;
    Ok(Json(members))
}

pub async fn invite(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(company_id): Path<Uuid>,
    Json(req): Json<InviteMember>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    let scope = CompanyScope::authorize(&state.pool, company_id, auth.user_id).await?;
    scope.require_owner()?;

    let role = req.role.as_deref().unwrap_or("member");
    let outcome = scope.invite_member(&req.email, role).await?;

    match outcome {
        InviteOutcome::Member(member) => {
            // Existing account: notify best-effort, membership stays pending
            // until the user accepts.
            if let Some(ref mailer) = state.system_mailer {
                if let (Ok(Some(company)), Ok(Some(user))) = (
                    db::companies::find_by_id(&state.pool, scope.company_id()).await,
                    db::users::find_by_id(&state.pool, member.user_id).await,
                ) {
                    let _ = mailer
                        .send_member_added(&user.email, &user.name, &company.name, &state.config.base_url)
                        .await;
                }
            }

            db::audit::record(
                &state.pool,
                scope.company_id(),
                Some(auth.user_id),
                "member.invited",
                "member",
                Some(member.id),
            )
            .await;

            Ok(Json(json!({ "status": "member_pending", "member": member })))
        }
        InviteOutcome::Invited(invitation) => {
            if let Some(ref mailer) = state.system_mailer {
                if let Ok(Some(company)) =
                    db::companies::find_by_id(&state.pool, scope.company_id()).await
                {
                    let invite_url =
                        format!("{}/invite/{}", state.config.base_url, invitation.token);
                    let _ = mailer
                        .send_invitation(&invitation.email, &company.name, &invite_url)
                        .await;
                }
            }

            db::audit::record(
                &state.pool,
                scope.company_id(),
                Some(auth.user_id),
                "invitation.created",
                "invitation",
                Some(invitation.id),
            )
            .await;

            Ok(Json(json!({ "status": "invited", "invitation": invitation })))
        }
    }
}

/// Accept a pending membership in this company.
pub async fn accept(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let member = db::members::activate(&state.pool, company_id, auth.user_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                AppError::NotFound("No pending invitation for this company".to_string())
            }
            _ => AppError::Database(e),
        })?;

    db::audit::record(
        &state.pool,
        company_id,
        Some(auth.user_id),
        "member.accepted",
        "member",
        Some(member.id),
    )
    .await;

    Ok(Json(json!({ "status": "active", "member": member })))
}
