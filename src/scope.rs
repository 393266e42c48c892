use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::db::documents::NewDocument;
use crate::db::tasks::{NewTask, TaskFilter};
use crate::error::AppError;
use crate::models::{CompanyInvitation, CompanyMember, Document, MemberProfile, Task};
use crate::storage::LocalStorage;

/// Invitation lifetime.
const INVITE_EXPIRY_DAYS: i64 = 7;

/// Tenant-scoped query façade.
///
/// Constructed through [`CompanyScope::authorize`], which verifies that the
/// acting user holds an active membership in the company. The scope holds
/// the company id for its lifetime and binds it into every query it issues;
/// callers never pass a company id to its operations.
pub struct CompanyScope {
    pool: PgPool,
    company_id: Uuid,
    user_id: Uuid,
    role: String,
}

/// Result of inviting an email address: a pending membership when the
/// account already exists, a tokened invitation otherwise.
pub enum InviteOutcome {
    Member(CompanyMember),
    Invited(CompanyInvitation),
}

impl CompanyScope {
    pub async fn authorize(
        pool: &PgPool,
        company_id: Uuid,
        user_id: Uuid,
    ) -> Result<Self, AppError> {
        let member = db::members::find_active(pool, company_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

        Ok(CompanyScope {
            pool: pool.clone(),
            company_id,
            user_id,
            role: member.role,
        })
    }

    pub fn company_id(&self) -> Uuid {
        self.company_id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn require_owner(&self) -> Result<(), AppError> {
        if self.role == "owner" {
            Ok(())
        } else {
            Err(AppError::Forbidden("Owner access required".to_string()))
        }
    }

    /// Newest first. An empty table is an empty list, not an error.
    pub async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, AppError> {
        Ok(db::tasks::list(&self.pool, self.company_id, filter).await?)
    }

    /// The scope's company id is persisted unconditionally; `NewTask` has no
    /// company field, so a caller-supplied tenant cannot leak through.
    pub async fn create_task(&self, task: &NewTask<'_>) -> Result<Task, AppError> {
        Ok(db::tasks::create(&self.pool, self.company_id, task).await?)
    }

    pub async fn find_task(&self, id: Uuid) -> Result<Task, AppError> {
        db::tasks::find_by_id(&self.pool, id, self.company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".to_string()))
    }

    pub async fn list_documents(&self) -> Result<Vec<Document>, AppError> {
        Ok(db::documents::list(&self.pool, self.company_id).await?)
    }

    /// Blob first, metadata second: a failed blob write leaves no document
    /// row. The reverse failure (row insert failing after the write) leaves
    /// an orphaned blob behind.
    pub async fn upload_document(
        &self,
        storage: &LocalStorage,
        name: &str,
        content_type: &str,
        bytes: &[u8],
        folder_id: Option<Uuid>,
    ) -> Result<Document, AppError> {
        let key = LocalStorage::generate_key(self.company_id, name);

        storage
            .put(&key, bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Blob upload failed: {e}")))?;

        let doc = db::documents::create(
            &self.pool,
            self.company_id,
            &NewDocument {
                folder_id,
                name,
                storage_path: &key,
                content_type,
                size_bytes: bytes.len() as i64,
                uploaded_by: self.user_id,
            },
        )
        .await?;

        Ok(doc)
    }

    pub async fn find_document(&self, id: Uuid) -> Result<Document, AppError> {
        db::documents::find_by_id(&self.pool, id, self.company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Document not found".to_string()))
    }

    /// Active members joined with minimal public profile fields, ordered by
    /// member name.
    pub async fn list_members(&self) -> Result<Vec<MemberProfile>, AppError> {
        Ok(db::members::list_profiles(&self.pool, self.company_id).await?)
    }

    /// Invite an email address. An existing account gets a pending
    /// membership row; an unknown address gets an invitation row with an
    /// opaque token and a fixed expiry. Delivery is not handled here.
    pub async fn invite_member(&self, email: &str, role: &str) -> Result<InviteOutcome, AppError> {
        if let Some(user) = db::users::find_by_email(&self.pool, email).await? {
            let member = db::members::create(
                &self.pool,
                self.company_id,
                user.id,
                role,
                "pending",
                Some(self.user_id),
            )
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    AppError::Conflict("Already a member of this company".to_string())
                }
                _ => AppError::Database(e),
            })?;
            return Ok(InviteOutcome::Member(member));
        }

        let token_bytes: [u8; 32] = rand::random();
        let token = hex::encode(token_bytes);
        let expires_at = Utc::now() + Duration::days(INVITE_EXPIRY_DAYS);

        let invitation = db::invitations::create(
            &self.pool,
            self.company_id,
            email,
            role,
            &token,
            self.user_id,
            expires_at,
        )
        .await?;

        Ok(InviteOutcome::Invited(invitation))
    }
}
