use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{
    AuthUserDto, OAuthRedirectDto, SessionResponseDto, SignInRequestDto, SignOutResponseDto,
    SignUpRequestDto, SignUpResponseDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, http::header::AUTHORIZATION, http::HeaderMap, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignUpRequestDto,
    responses(
        (status = 201, description = "Account registered, confirmation email sent", body = ApiResponse<SignUpResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn sign_up(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<SignUpRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<SignUpResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service
        .sign_up(&dto.email, &dto.password, dto.phone.as_deref())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(response), None, None)),
    ))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/signin",
    request_body = SignInRequestDto,
    responses(
        (status = 200, description = "Sign in successful", body = ApiResponse<SessionResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials or unconfirmed email"),
        (status = 429, description = "Too many attempts")
    ),
    tag = "auth"
)]
pub async fn sign_in(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<SignInRequestDto>,
) -> Result<Json<ApiResponse<SessionResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let session = service.sign_in(&dto.email, &dto.password).await?;
    Ok(Json(ApiResponse::success(Some(session), None, None)))
}

/// Start the Google OAuth flow
#[utoipa::path(
    post,
    path = "/api/auth/oauth/google",
    responses(
        (status = 200, description = "Redirect URL for the provider's authorize endpoint", body = ApiResponse<OAuthRedirectDto>),
    ),
    tag = "auth"
)]
pub async fn sign_in_with_google(
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<OAuthRedirectDto>>> {
    let redirect = service.sign_in_with_google();
    Ok(Json(ApiResponse::success(Some(redirect), None, None)))
}

/// Sign out, invalidating the presented session
///
/// Public on purpose: an expired token must still be able to sign out
/// cleanly.
#[utoipa::path(
    post,
    path = "/api/auth/signout",
    responses(
        (status = 200, description = "Session invalidated", body = ApiResponse<SignOutResponseDto>),
    ),
    tag = "auth"
)]
pub async fn sign_out(
    State(service): State<Arc<AuthService>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<SignOutResponseDto>>> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    if let Some(token) = token {
        service.sign_out(token).await?;
    }

    Ok(Json(ApiResponse::success(
        Some(SignOutResponseDto { signed_out: true }),
        None,
        None,
    )))
}

/// Get the current authenticated identity
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current identity", body = ApiResponse<AuthUserDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<AuthUserDto>>> {
    let user = service.current_user(user);
    Ok(Json(ApiResponse::success(Some(user), None, None)))
}
