use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request DTO for account registration
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignUpRequestDto {
    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter pelo menos 6 caracteres"))]
    pub password: String,

    /// Optional contact phone stored in the identity metadata
    pub phone: Option<String>,
}

/// Request DTO for password sign-in
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignInRequestDto {
    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(length(min = 1, message = "Senha é obrigatória"))]
    pub password: String,
}

/// Identity info included in session responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthUserDto {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Response DTO for a provider-issued session
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponseDto {
    /// Provider access token (JWT)
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiry time in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    /// Refresh token for obtaining new access tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub user: AuthUserDto,
}

/// Response DTO for registration: confirmation may still be pending, so no
/// session is returned
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignUpResponseDto {
    pub registered: bool,
}

/// Response DTO for the OAuth redirect flow
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OAuthRedirectDto {
    /// URL the visitor must be redirected to; authentication completes on
    /// the provider's side
    pub url: String,
}

/// Response DTO for sign-out requests
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignOutResponseDto {
    pub signed_out: bool,
}
