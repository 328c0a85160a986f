use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::profiles::dtos::{ProfileResponseDto, UpdateProfileDto};
use crate::features::profiles::services::ProfileService;
use crate::shared::types::ApiResponse;

/// Get the caller's own profile
///
/// Returns `data: null` when the row has not been materialized yet; callers
/// treat that as "profile still being created", not as a failure.
#[utoipa::path(
    get,
    path = "/api/profile/me",
    responses(
        (status = 200, description = "Profile of the current user (null while pending)", body = ApiResponse<ProfileResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "profiles",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_my_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<ProfileService>>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    let profile = service.fetch_with_retry(user.user_id).await;
    Ok(Json(ApiResponse::success(
        profile.map(Into::into),
        None,
        None,
    )))
}

/// Query params for the admin user listing
#[derive(Debug, Deserialize)]
pub struct ListProfilesQuery {
    /// Case-insensitive substring matched against email, phone and sector
    pub search: Option<String>,
}

/// List profiles (admin user management), newest first
#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(
        ("search" = Option<String>, Query, description = "Filter by email, phone or sector")
    ),
    responses(
        (status = 200, description = "List of profiles", body = ApiResponse<Vec<ProfileResponseDto>>),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_profiles(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ProfileService>>,
    Query(query): Query<ListProfilesQuery>,
) -> Result<Json<ApiResponse<Vec<ProfileResponseDto>>>> {
    let profiles = service.list(query.search.as_deref()).await?;
    Ok(Json(ApiResponse::success(Some(profiles), None, None)))
}

/// Update a profile (sector, phone, admin/blocked flags)
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    params(
        ("id" = Uuid, Path, description = "Profile id")
    ),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<ProfileResponseDto>),
        (status = 404, description = "Profile not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_profile(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ProfileService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateProfileDto>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    let profile = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(profile),
        Some("Usuário atualizado com sucesso!".to_string()),
        None,
    )))
}

/// Delete a profile row
///
/// Removes only the application profile; the identity record at the auth
/// provider is left untouched.
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(
        ("id" = Uuid, Path, description = "Profile id")
    ),
    responses(
        (status = 200, description = "Profile deleted"),
        (status = 404, description = "Profile not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_profile(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ProfileService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Usuário removido com sucesso!".to_string()),
        None,
    )))
}
