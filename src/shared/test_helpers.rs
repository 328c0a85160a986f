#[cfg(test)]
use crate::features::auth::guards::CurrentProfile;
#[cfg(test)]
use crate::features::profiles::models::Profile;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub fn create_admin_profile() -> Profile {
    Profile {
        id: uuid::Uuid::new_v4(),
        user_id: uuid::Uuid::new_v4(),
        email: "admin@example.com".to_string(),
        phone: None,
        setor: "varejo".to_string(),
        is_admin: true,
        is_blocked: false,
        created_at: chrono::Utc::now(),
    }
}

#[cfg(test)]
async fn inject_profile_middleware(
    profile: Profile,
    mut request: Request,
    next: Next,
) -> Response {
    request.extensions_mut().insert(CurrentProfile(profile));
    next.run(request).await
}

/// Wrap a router so every request carries the given resolved profile,
/// standing in for the auth + admin middleware chain.
#[cfg(test)]
pub fn with_profile(router: Router, profile: Profile) -> Router {
    router.layer(axum::middleware::from_fn(move |request: Request, next: Next| {
        inject_profile_middleware(profile.clone(), request, next)
    }))
}
