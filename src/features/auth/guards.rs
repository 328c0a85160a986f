//! Request guards for the administrative surface.
//!
//! The admin flags live on the caller's `profiles` row, not in the token, so
//! the admin middleware resolves the profile once per request and stores it
//! as a [`CurrentProfile`] extension; these guards read it back.

use crate::core::error::AppError;
use crate::features::profiles::models::Profile;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Profile of the authenticated caller, resolved by the admin middleware
#[derive(Debug, Clone)]
pub struct CurrentProfile(pub Profile);

impl<S> FromRequestParts<S> for CurrentProfile
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentProfile>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Profile not resolved".to_string()))
    }
}

/// Guard for administrative operations.
///
/// Allows only callers whose profile has `is_admin` set and `is_blocked`
/// clear. A blocked profile is rejected regardless of its admin flag.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(profile): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub Profile);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let CurrentProfile(profile) = parts
            .extensions
            .get::<CurrentProfile>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if profile.is_blocked {
            return Err(AppError::Forbidden("Account is blocked".to_string()));
        }

        if !profile.is_admin {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_admin_profile, with_profile};
    use axum::{routing::get, Router};
    use axum_test::TestServer;

    async fn admin_only(RequireAdmin(profile): RequireAdmin) -> String {
        profile.email
    }

    fn app() -> Router {
        Router::new().route("/admin-only", get(admin_only))
    }

    #[tokio::test]
    async fn test_admin_passes() {
        let server = TestServer::new(with_profile(app(), create_admin_profile())).unwrap();

        let response = server.get("/admin-only").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "admin@example.com");
    }

    #[tokio::test]
    async fn test_non_admin_is_forbidden() {
        let mut profile = create_admin_profile();
        profile.is_admin = false;

        let server = TestServer::new(with_profile(app(), profile)).unwrap();
        let response = server.get("/admin-only").await;
        response.assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_blocked_admin_is_forbidden() {
        // The blocked flag wins over the admin flag
        let mut profile = create_admin_profile();
        profile.is_blocked = true;

        let server = TestServer::new(with_profile(app(), profile)).unwrap();
        let response = server.get("/admin-only").await;
        response.assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_missing_profile_is_unauthorized() {
        let server = TestServer::new(app()).unwrap();
        let response = server.get("/admin-only").await;
        response.assert_status_unauthorized();
    }
}
