use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::profiles::handlers;
use crate::features::profiles::services::ProfileService;

/// Self-service profile routes (require authentication)
pub fn routes(service: Arc<ProfileService>) -> Router {
    Router::new()
        .route("/api/profile/me", get(handlers::get_my_profile))
        .with_state(service)
}

/// Admin user-management routes (mounted under /api/admin)
pub fn admin_routes(service: Arc<ProfileService>) -> Router {
    Router::new()
        .route("/users", get(handlers::list_profiles))
        .route(
            "/users/{id}",
            put(handlers::update_profile).delete(handlers::delete_profile),
        )
        .with_state(service)
}
