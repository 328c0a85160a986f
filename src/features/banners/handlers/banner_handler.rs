use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::banners::dtos::{BannerResponseDto, CreateBannerDto, UpdateBannerDto};
use crate::features::banners::services::BannerService;
use crate::shared::types::ApiResponse;

/// Active carousel banners in display order
#[utoipa::path(
    get,
    path = "/api/banners",
    responses(
        (status = 200, description = "Active banners", body = ApiResponse<Vec<BannerResponseDto>>),
    ),
    tag = "banners"
)]
pub async fn list_banners(
    State(service): State<Arc<BannerService>>,
) -> Result<Json<ApiResponse<Vec<BannerResponseDto>>>> {
    let banners = service.list_active().await?;
    Ok(Json(ApiResponse::success(Some(banners), None, None)))
}

/// All banners (admin screen)
#[utoipa::path(
    get,
    path = "/api/admin/banners",
    responses(
        (status = 200, description = "All banners", body = ApiResponse<Vec<BannerResponseDto>>),
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_all_banners(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<BannerService>>,
) -> Result<Json<ApiResponse<Vec<BannerResponseDto>>>> {
    let banners = service.list_all().await?;
    Ok(Json(ApiResponse::success(Some(banners), None, None)))
}

/// Create a banner
#[utoipa::path(
    post,
    path = "/api/admin/banners",
    request_body = CreateBannerDto,
    responses(
        (status = 201, description = "Banner created", body = ApiResponse<BannerResponseDto>),
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_banner(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<BannerService>>,
    AppJson(dto): AppJson<CreateBannerDto>,
) -> Result<(StatusCode, Json<ApiResponse<BannerResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let banner = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(banner),
            Some("Banner criado com sucesso!".to_string()),
            None,
        )),
    ))
}

/// Update a banner (activation flag and carousel position included)
#[utoipa::path(
    put,
    path = "/api/admin/banners/{id}",
    params(
        ("id" = Uuid, Path, description = "Banner id")
    ),
    request_body = UpdateBannerDto,
    responses(
        (status = 200, description = "Banner updated", body = ApiResponse<BannerResponseDto>),
        (status = 404, description = "Banner not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_banner(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<BannerService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateBannerDto>,
) -> Result<Json<ApiResponse<BannerResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let banner = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(banner),
        Some("Banner atualizado com sucesso!".to_string()),
        None,
    )))
}

/// Delete a banner
#[utoipa::path(
    delete,
    path = "/api/admin/banners/{id}",
    params(
        ("id" = Uuid, Path, description = "Banner id")
    ),
    responses(
        (status = 200, description = "Banner deleted"),
        (status = 404, description = "Banner not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_banner(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<BannerService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Banner excluído com sucesso!".to_string()),
        None,
    )))
}
