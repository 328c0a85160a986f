use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::settings::handlers;
use crate::features::settings::services::SettingsService;

/// Public storefront route for the store contact settings
pub fn routes(service: Arc<SettingsService>) -> Router {
    Router::new()
        .route("/api/store-settings", get(handlers::get_store_settings))
        .with_state(service)
}

/// Admin route (mounted under /api/admin)
pub fn admin_routes(service: Arc<SettingsService>) -> Router {
    Router::new()
        .route("/store-settings", put(handlers::update_store_settings))
        .with_state(service)
}
