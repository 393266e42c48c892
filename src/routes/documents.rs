use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::{Document, Folder};
use crate::scope::CompanyScope;
use crate::state::SharedState;

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<Vec<Document>>, AppError> {
    let scope = CompanyScope::authorize(&state.pool, company_id, auth.user_id).await?;
    let docs = scope.list_documents().await?;
    Ok(Json(docs))
}

pub async fn list_folders(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<Vec<Folder>>, AppError> {
    let scope = CompanyScope::authorize(&state.pool, company_id, auth.user_id).await?;
    let folders = db::folders::list(&state.pool, scope.company_id()).await?;
    Ok(Json(folders))
}

/// Multipart upload: a `file` part plus an optional `folder_id` part.
pub async fn upload(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(company_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<Document>, AppError> {
    let scope = CompanyScope::authorize(&state.pool, company_id, auth.user_id).await?;

    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut folder_id: Option<Uuid> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let name = field
                    .file_name()
                    .unwrap_or("upload")
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {e}")))?;
                file = Some((name, content_type, bytes.to_vec()));
            }
            Some("folder_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid folder_id: {e}")))?;
                folder_id = Some(
                    text.parse()
                        .map_err(|e| AppError::BadRequest(format!("Invalid folder_id: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let (name, content_type, bytes) =
        file.ok_or_else(|| AppError::BadRequest("Missing file part".to_string()))?;

    let doc = scope
        .upload_document(&state.storage, &name, &content_type, &bytes, folder_id)
        .await?;

    db::audit::record(
        &state.pool,
        scope.company_id(),
        Some(auth.user_id),
        "document.uploaded",
        "document",
        Some(doc.id),
    )
    .await;

    Ok(Json(doc))
}

pub async fn download(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path((company_id, id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let scope = CompanyScope::authorize(&state.pool, company_id, auth.user_id).await?;
    let doc = scope.find_document(id).await?;

    let bytes = state
        .storage
        .get(&doc.storage_path)
        .await
        .map_err(|e| AppError::Internal(format!("Blob read failed: {e}")))?;

    let headers = [
        (header::CONTENT_TYPE, doc.content_type.clone()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", doc.name),
        ),
    ];

    Ok((headers, bytes))
}
