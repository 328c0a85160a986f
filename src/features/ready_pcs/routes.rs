use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::ready_pcs::handlers;
use crate::features::ready_pcs::services::ReadyPcService;

/// Public storefront routes for ready-built PCs
pub fn routes(service: Arc<ReadyPcService>) -> Router {
    Router::new()
        .route("/api/ready-pcs", get(handlers::list_ready_pcs))
        .route("/api/ready-pcs/{id}", get(handlers::get_ready_pc))
        .with_state(service)
}

/// Admin CRUD routes (mounted under /api/admin)
pub fn admin_routes(service: Arc<ReadyPcService>) -> Router {
    Router::new()
        .route(
            "/ready-pcs",
            get(handlers::list_all_ready_pcs).post(handlers::create_ready_pc),
        )
        .route(
            "/ready-pcs/{id}",
            put(handlers::update_ready_pc).delete(handlers::delete_ready_pc),
        )
        .with_state(service)
}
