use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::clients::dtos::{ClienteResponseDto, CreateClienteDto, UpdateClienteDto};
use crate::features::clients::services::ClienteService;
use crate::shared::types::ApiResponse;

/// Query params for the cliente listing
#[derive(Debug, Deserialize)]
pub struct ListClientesQuery {
    /// Case-insensitive substring matched against company name, code, tax
    /// id, contact and phone
    pub search: Option<String>,
}

/// List clientes ordered by sequential code
#[utoipa::path(
    get,
    path = "/api/admin/clientes",
    params(
        ("search" = Option<String>, Query, description = "Filter by name, code, tax id, contact or phone")
    ),
    responses(
        (status = 200, description = "List of clientes", body = ApiResponse<Vec<ClienteResponseDto>>),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_clientes(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ClienteService>>,
    Query(query): Query<ListClientesQuery>,
) -> Result<Json<ApiResponse<Vec<ClienteResponseDto>>>> {
    let clientes = service.list(query.search.as_deref()).await?;
    Ok(Json(ApiResponse::success(Some(clientes), None, None)))
}

/// Register a cliente
#[utoipa::path(
    post,
    path = "/api/admin/clientes",
    request_body = CreateClienteDto,
    responses(
        (status = 201, description = "Cliente registered", body = ApiResponse<ClienteResponseDto>),
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_cliente(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ClienteService>>,
    AppJson(dto): AppJson<CreateClienteDto>,
) -> Result<(StatusCode, Json<ApiResponse<ClienteResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let cliente = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(cliente),
            Some("Cliente cadastrado com sucesso!".to_string()),
            None,
        )),
    ))
}

/// Update a cliente
#[utoipa::path(
    put,
    path = "/api/admin/clientes/{id}",
    params(
        ("id" = Uuid, Path, description = "Cliente id")
    ),
    request_body = UpdateClienteDto,
    responses(
        (status = 200, description = "Cliente updated", body = ApiResponse<ClienteResponseDto>),
        (status = 404, description = "Cliente not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_cliente(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ClienteService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateClienteDto>,
) -> Result<Json<ApiResponse<ClienteResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let cliente = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(cliente),
        Some("Cliente atualizado com sucesso!".to_string()),
        None,
    )))
}

/// Toggle the active flag of a cliente
#[utoipa::path(
    post,
    path = "/api/admin/clientes/{id}/toggle",
    params(
        ("id" = Uuid, Path, description = "Cliente id")
    ),
    responses(
        (status = 200, description = "Cliente toggled", body = ApiResponse<ClienteResponseDto>),
        (status = 404, description = "Cliente not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn toggle_cliente(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ClienteService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ClienteResponseDto>>> {
    let cliente = service.toggle_active(id).await?;
    let message = if cliente.is_active {
        "Cliente ativado com sucesso!"
    } else {
        "Cliente desativado com sucesso!"
    };
    Ok(Json(ApiResponse::success(
        Some(cliente),
        Some(message.to_string()),
        None,
    )))
}

/// Delete a cliente
#[utoipa::path(
    delete,
    path = "/api/admin/clientes/{id}",
    params(
        ("id" = Uuid, Path, description = "Cliente id")
    ),
    responses(
        (status = 200, description = "Cliente deleted"),
        (status = 404, description = "Cliente not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_cliente(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ClienteService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Cliente excluído com sucesso!".to_string()),
        None,
    )))
}
