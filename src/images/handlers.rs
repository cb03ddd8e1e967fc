use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    images::services::{store_images, UploadItem, MAX_IMAGES},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub urls: Vec<String>,
}

/// POST /listings/images — multipart field `images`, up to five files.
#[instrument(skip(state, multipart))]
pub async fn upload_images(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut files: Vec<UploadItem> = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))?
    {
        let name = field.name().unwrap_or_default();
        if name != "images" && name != "images[]" {
            continue;
        }
        if files.len() == MAX_IMAGES {
            return Err(ApiError::Validation(format!(
                "At most {MAX_IMAGES} images per upload"
            )));
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let body = field.bytes().await.map_err(|e| ApiError::Upload(e.into()))?;
        files.push(UploadItem { body, content_type });
    }

    if files.is_empty() {
        return Err(ApiError::Validation("images field is required".into()));
    }

    let count = files.len();
    let urls = store_images(&state, user_id, files).await?;

    info!(user_id = %user_id, count, "images uploaded");
    Ok(Json(UploadResponse { urls }))
}
