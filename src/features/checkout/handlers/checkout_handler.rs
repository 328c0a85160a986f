use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::checkout::dtos::{
    BuildQuoteRequestDto, ReadyPcInterestDto, WhatsAppLinkDto,
};
use crate::features::checkout::services::CheckoutService;
use crate::shared::types::ApiResponse;

/// WhatsApp hand-off link for a build-your-own-PC quote
#[utoipa::path(
    post,
    path = "/api/checkout/whatsapp/build",
    request_body = BuildQuoteRequestDto,
    responses(
        (status = 200, description = "Deep link built", body = ApiResponse<WhatsAppLinkDto>),
        (status = 400, description = "No components selected")
    ),
    tag = "checkout"
)]
pub async fn build_quote_link(
    State(service): State<Arc<CheckoutService>>,
    AppJson(dto): AppJson<BuildQuoteRequestDto>,
) -> Result<Json<ApiResponse<WhatsAppLinkDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let link = service.build_quote_link(dto).await?;
    Ok(Json(ApiResponse::success(Some(link), None, None)))
}

/// WhatsApp hand-off link for a ready-built PC
#[utoipa::path(
    post,
    path = "/api/checkout/whatsapp/ready-pc",
    request_body = ReadyPcInterestDto,
    responses(
        (status = 200, description = "Deep link built", body = ApiResponse<WhatsAppLinkDto>),
        (status = 404, description = "Ready PC not found")
    ),
    tag = "checkout"
)]
pub async fn ready_pc_link(
    State(service): State<Arc<CheckoutService>>,
    AppJson(dto): AppJson<ReadyPcInterestDto>,
) -> Result<Json<ApiResponse<WhatsAppLinkDto>>> {
    let link = service.ready_pc_link(dto).await?;
    Ok(Json(ApiResponse::success(Some(link), None, None)))
}
