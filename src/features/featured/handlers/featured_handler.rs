use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::featured::dtos::{
    CreateFeaturedDto, FeaturedProductDto, FeaturedSlotDto, UpdateFeaturedDto,
};
use crate::features::featured::services::FeaturedService;
use crate::shared::types::ApiResponse;

/// Featured products in display order
#[utoipa::path(
    get,
    path = "/api/featured",
    responses(
        (status = 200, description = "Featured products", body = ApiResponse<Vec<FeaturedProductDto>>),
    ),
    tag = "featured"
)]
pub async fn list_featured(
    State(service): State<Arc<FeaturedService>>,
) -> Result<Json<ApiResponse<Vec<FeaturedProductDto>>>> {
    let featured = service.list().await?;
    Ok(Json(ApiResponse::success(Some(featured), None, None)))
}

/// Feature a product
#[utoipa::path(
    post,
    path = "/api/admin/featured",
    request_body = CreateFeaturedDto,
    responses(
        (status = 201, description = "Product featured", body = ApiResponse<FeaturedSlotDto>),
        (status = 409, description = "Product already featured")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_featured(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<FeaturedService>>,
    AppJson(dto): AppJson<CreateFeaturedDto>,
) -> Result<(StatusCode, Json<ApiResponse<FeaturedSlotDto>>)> {
    let slot = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(slot.into()),
            Some("Produto adicionado aos destaques!".to_string()),
            None,
        )),
    ))
}

/// Move a featured slot
#[utoipa::path(
    put,
    path = "/api/admin/featured/{id}",
    params(
        ("id" = Uuid, Path, description = "Featured slot id")
    ),
    request_body = UpdateFeaturedDto,
    responses(
        (status = 200, description = "Slot moved", body = ApiResponse<FeaturedSlotDto>),
        (status = 404, description = "Slot not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_featured(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<FeaturedService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateFeaturedDto>,
) -> Result<Json<ApiResponse<FeaturedSlotDto>>> {
    let slot = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(slot.into()), None, None)))
}

/// Remove a product from the featured list
#[utoipa::path(
    delete,
    path = "/api/admin/featured/{id}",
    params(
        ("id" = Uuid, Path, description = "Featured slot id")
    ),
    responses(
        (status = 200, description = "Slot removed"),
        (status = 404, description = "Slot not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_featured(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<FeaturedService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Produto removido dos destaques!".to_string()),
        None,
    )))
}
