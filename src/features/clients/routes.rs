use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::clients::handlers;
use crate::features::clients::services::ClienteService;

/// Admin CRUD routes (mounted under /api/admin)
pub fn admin_routes(service: Arc<ClienteService>) -> Router {
    Router::new()
        .route(
            "/clientes",
            get(handlers::list_clientes).post(handlers::create_cliente),
        )
        .route(
            "/clientes/{id}",
            put(handlers::update_cliente).delete(handlers::delete_cliente),
        )
        .route("/clientes/{id}/toggle", post(handlers::toggle_cliente))
        .with_state(service)
}
