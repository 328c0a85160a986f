use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::banners::handlers;
use crate::features::banners::services::BannerService;

/// Public storefront routes for the banner carousel
pub fn routes(service: Arc<BannerService>) -> Router {
    Router::new()
        .route("/api/banners", get(handlers::list_banners))
        .with_state(service)
}

/// Admin CRUD routes (mounted under /api/admin)
pub fn admin_routes(service: Arc<BannerService>) -> Router {
    Router::new()
        .route(
            "/banners",
            get(handlers::list_all_banners).post(handlers::create_banner),
        )
        .route(
            "/banners/{id}",
            put(handlers::update_banner).delete(handlers::delete_banner),
        )
        .with_state(service)
}
