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
use crate::features::ready_pcs::dtos::{CreateReadyPcDto, ReadyPcResponseDto, UpdateReadyPcDto};
use crate::features::ready_pcs::services::ReadyPcService;
use crate::shared::types::ApiResponse;

/// Active ready-built PCs with their component lists
#[utoipa::path(
    get,
    path = "/api/ready-pcs",
    responses(
        (status = 200, description = "Active ready PCs", body = ApiResponse<Vec<ReadyPcResponseDto>>),
    ),
    tag = "ready-pcs"
)]
pub async fn list_ready_pcs(
    State(service): State<Arc<ReadyPcService>>,
) -> Result<Json<ApiResponse<Vec<ReadyPcResponseDto>>>> {
    let pcs = service.list_active().await?;
    Ok(Json(ApiResponse::success(Some(pcs), None, None)))
}

/// Get one ready PC
#[utoipa::path(
    get,
    path = "/api/ready-pcs/{id}",
    params(
        ("id" = Uuid, Path, description = "Ready PC id")
    ),
    responses(
        (status = 200, description = "Ready PC found", body = ApiResponse<ReadyPcResponseDto>),
        (status = 404, description = "Ready PC not found")
    ),
    tag = "ready-pcs"
)]
pub async fn get_ready_pc(
    State(service): State<Arc<ReadyPcService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReadyPcResponseDto>>> {
    let pc = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(pc), None, None)))
}

/// All ready PCs (admin screen)
#[utoipa::path(
    get,
    path = "/api/admin/ready-pcs",
    responses(
        (status = 200, description = "All ready PCs", body = ApiResponse<Vec<ReadyPcResponseDto>>),
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_all_ready_pcs(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ReadyPcService>>,
) -> Result<Json<ApiResponse<Vec<ReadyPcResponseDto>>>> {
    let pcs = service.list_all().await?;
    Ok(Json(ApiResponse::success(Some(pcs), None, None)))
}

/// Create a ready PC with its component list
#[utoipa::path(
    post,
    path = "/api/admin/ready-pcs",
    request_body = CreateReadyPcDto,
    responses(
        (status = 201, description = "Ready PC created", body = ApiResponse<ReadyPcResponseDto>),
        (status = 400, description = "No components selected")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_ready_pc(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ReadyPcService>>,
    AppJson(dto): AppJson<CreateReadyPcDto>,
) -> Result<(StatusCode, Json<ApiResponse<ReadyPcResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let pc = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(pc),
            Some("PC pronto criado".to_string()),
            None,
        )),
    ))
}

/// Update a ready PC; a present component list replaces the previous set
#[utoipa::path(
    put,
    path = "/api/admin/ready-pcs/{id}",
    params(
        ("id" = Uuid, Path, description = "Ready PC id")
    ),
    request_body = UpdateReadyPcDto,
    responses(
        (status = 200, description = "Ready PC updated", body = ApiResponse<ReadyPcResponseDto>),
        (status = 404, description = "Ready PC not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_ready_pc(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ReadyPcService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateReadyPcDto>,
) -> Result<Json<ApiResponse<ReadyPcResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let pc = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(pc),
        Some("PC pronto atualizado".to_string()),
        None,
    )))
}

/// Delete a ready PC and its components
#[utoipa::path(
    delete,
    path = "/api/admin/ready-pcs/{id}",
    params(
        ("id" = Uuid, Path, description = "Ready PC id")
    ),
    responses(
        (status = 200, description = "Ready PC deleted"),
        (status = 404, description = "Ready PC not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_ready_pc(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ReadyPcService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("PC pronto excluído".to_string()),
        None,
    )))
}
