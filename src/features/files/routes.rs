use std::sync::Arc;

use axum::{
    routing::{delete, post},
    Router,
};

use crate::features::files::handlers;
use crate::features::files::services::FileService;

/// Admin routes for image management (mounted under /api/admin)
pub fn admin_routes(service: Arc<FileService>) -> Router {
    Router::new()
        .route("/files/upload", post(handlers::upload_image))
        .route("/files", delete(handlers::delete_image_by_url))
        .with_state(service)
}
