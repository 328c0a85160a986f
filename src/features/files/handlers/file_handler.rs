use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::auth::guards::RequireAdmin;
use crate::features::files::dtos::{
    is_mime_type_allowed, DeleteImageByUrlDto, DeleteImageResponseDto, ImageUploadResponseDto,
    UploadImageDto, ALLOWED_MIME_TYPES, MAX_FILE_SIZE,
};
use crate::features::files::services::FileService;
use crate::shared::types::ApiResponse;

/// Upload a catalog image
///
/// Accepts multipart/form-data with:
/// - `file`: The image to upload (required)
/// - `folder`: Optional destination folder (defaults to "products")
#[utoipa::path(
    post,
    path = "/api/admin/files/upload",
    tag = "admin",
    request_body(
        content = UploadImageDto,
        content_type = "multipart/form-data",
        description = "Image upload form with an optional destination folder",
    ),
    responses(
        (status = 201, description = "Image uploaded", body = ApiResponse<ImageUploadResponseDto>),
        (status = 400, description = "Invalid file type or file too large"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_image(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<FileService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ImageUploadResponseDto>>), AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut folder = "products".to_string();

    // Process multipart fields
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let ct = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let fname = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                file_data = Some(data.to_vec());
                file_name = Some(fname);
                content_type = Some(ct);
            }
            "folder" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read folder field: {}", e))
                })?;
                if !text.is_empty() {
                    folder = text;
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    // Validate required fields
    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;
    let file_name =
        file_name.ok_or_else(|| AppError::BadRequest("Filename is required".to_string()))?;
    let content_type =
        content_type.ok_or_else(|| AppError::BadRequest("Content type is required".to_string()))?;

    // Validate file size
    if file_data.len() > MAX_FILE_SIZE {
        return Err(AppError::BadRequest(format!(
            "File too large. Maximum size is {} bytes ({} MB)",
            MAX_FILE_SIZE,
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    // Validate MIME type
    if !is_mime_type_allowed(&content_type) {
        return Err(AppError::BadRequest(format!(
            "File type '{}' is not allowed. Allowed types: {}",
            content_type,
            ALLOWED_MIME_TYPES.join(", ")
        )));
    }

    let response = service
        .upload_image(file_data, &file_name, &content_type, &folder)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(response),
            Some("Imagem enviada com sucesso.".to_string()),
            None,
        )),
    ))
}

/// Delete an image by its URL
#[utoipa::path(
    delete,
    path = "/api/admin/files",
    tag = "admin",
    request_body = DeleteImageByUrlDto,
    responses(
        (status = 200, description = "Image deleted", body = ApiResponse<DeleteImageResponseDto>),
        (status = 400, description = "Invalid URL"),
        (status = 404, description = "Image not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_image_by_url(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<FileService>>,
    Json(dto): Json<DeleteImageByUrlDto>,
) -> Result<Json<ApiResponse<DeleteImageResponseDto>>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.delete_by_url(&dto.url).await?;

    Ok(Json(ApiResponse::success(
        Some(DeleteImageResponseDto { deleted: true }),
        Some("Imagem removida com sucesso.".to_string()),
        None,
    )))
}
