use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::settings::dtos::{StoreSettingsDto, UpdateStoreSettingsDto};
use crate::features::settings::services::SettingsService;
use crate::shared::types::ApiResponse;

/// Store contact settings (WhatsApp numbers, social links)
#[utoipa::path(
    get,
    path = "/api/store-settings",
    responses(
        (status = 200, description = "Store settings", body = ApiResponse<StoreSettingsDto>),
    ),
    tag = "settings"
)]
pub async fn get_store_settings(
    State(service): State<Arc<SettingsService>>,
) -> Result<Json<ApiResponse<StoreSettingsDto>>> {
    let settings = service.get().await?;
    Ok(Json(ApiResponse::success(Some(settings.into()), None, None)))
}

/// Update store contact settings
#[utoipa::path(
    put,
    path = "/api/admin/store-settings",
    request_body = UpdateStoreSettingsDto,
    responses(
        (status = 200, description = "Settings saved", body = ApiResponse<StoreSettingsDto>),
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_store_settings(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<SettingsService>>,
    AppJson(dto): AppJson<UpdateStoreSettingsDto>,
) -> Result<Json<ApiResponse<StoreSettingsDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let settings = service.update(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(settings.into()),
        Some("Configurações salvas com sucesso!".to_string()),
        None,
    )))
}
