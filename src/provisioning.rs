use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::db::companies::NewCompany;
use crate::error::AppError;
use crate::models::{Company, CompanyMember};
use crate::slug::{slugify, validate_slug, with_random_suffix};

/// Folders every new workspace starts with.
pub const DEFAULT_FOLDERS: [&str; 3] = ["General", "Finance", "HR"];

#[derive(Debug, Deserialize)]
pub struct ProvisionRequest {
    pub name: String,
    pub plan_id: Option<String>,
    pub company_size: Option<String>,
    pub industry: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProvisionOutcome {
    pub company: Company,
    pub membership: CompanyMember,
    pub redirect_to: String,
}

/// Establish a new company workspace for `user_id`.
///
/// The sequence is linear and deliberately non-transactional, matching how
/// the product behaves in the field:
///
/// 1. derive a slug from the company name;
/// 2. insert the company row, retrying exactly once with a random suffix
///    and a reduced field set if the slug is taken;
/// 3. insert the owner membership (fatal on failure: the company row stays
///    behind, nothing is rolled back);
/// 4. create the default folders best-effort;
/// 5. refresh the caller's active-company snapshot;
/// 6. hand back the workspace redirect path.
///
/// The caller's identity is resolved by the auth extractor before this
/// function runs, so an unauthenticated request never reaches the first
/// write.
pub async fn provision(
    pool: &PgPool,
    user_id: Uuid,
    trial_days: i64,
    req: &ProvisionRequest,
) -> Result<ProvisionOutcome, AppError> {
    let slug = slugify(&req.name);
    validate_slug(&slug).map_err(AppError::BadRequest)?;

    let plan_id = req.plan_id.as_deref().unwrap_or("trial");

    let company = insert_company(pool, user_id, trial_days, req, &slug, plan_id).await?;

    let membership = db::members::create(pool, company.id, user_id, "owner", "active", None)
        .await
        .map_err(AppError::Database)?;

    for folder in DEFAULT_FOLDERS {
        if let Err(e) = db::folders::create(pool, company.id, folder, user_id).await {
            tracing::warn!(
                company_id = %company.id,
                "Failed to create default folder {folder}: {e}"
            );
        }
    }

    if let Err(e) = db::active_companies::upsert(
        pool,
        user_id,
        company.id,
        &company.name,
        &company.slug,
        &membership.role,
    )
    .await
    {
        tracing::warn!(company_id = %company.id, "Failed to write active-company snapshot: {e}");
    }

    let redirect_to = format!("/app/{}/dashboard", company.slug);

    Ok(ProvisionOutcome {
        company,
        membership,
        redirect_to,
    })
}

/// One attempt with the derived slug, then exactly one retry with a random
/// suffix if the store reports a uniqueness violation. Any other error, or
/// a second failure, surfaces to the caller.
async fn insert_company(
    pool: &PgPool,
    user_id: Uuid,
    trial_days: i64,
    req: &ProvisionRequest,
    slug: &str,
    plan_id: &str,
) -> Result<Company, AppError> {
    let attempt = db::companies::create(
        pool,
        &NewCompany {
            name: &req.name,
            slug,
            plan_id,
            trial_ends_at: Some(Utc::now() + Duration::days(trial_days)),
            company_size: req.company_size.as_deref(),
            industry: req.industry.as_deref(),
            created_by: user_id,
        },
    )
    .await;

    match attempt {
        Ok(company) => Ok(company),
        Err(sqlx::Error::Database(ref db_err)) if db_err.is_unique_violation() => {
            let suffixed = with_random_suffix(slug);
            tracing::info!("Slug {slug:?} taken, retrying as {suffixed:?}");

            db::companies::create_minimal(pool, &req.name, &suffixed, plan_id, user_id)
                .await
                .map_err(|e| match e {
                    sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                        AppError::Conflict("A company with this slug already exists".to_string())
                    }
                    _ => AppError::Database(e),
                })
        }
        Err(e) => Err(AppError::Database(e)),
    }
}
