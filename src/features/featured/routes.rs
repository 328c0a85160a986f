use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::featured::handlers;
use crate::features::featured::services::FeaturedService;

/// Public storefront route for the featured section
pub fn routes(service: Arc<FeaturedService>) -> Router {
    Router::new()
        .route("/api/featured", get(handlers::list_featured))
        .with_state(service)
}

/// Admin routes (mounted under /api/admin)
pub fn admin_routes(service: Arc<FeaturedService>) -> Router {
    Router::new()
        .route("/featured", post(handlers::create_featured))
        .route(
            "/featured/{id}",
            put(handlers::update_featured).delete(handlers::delete_featured),
        )
        .with_state(service)
}
