use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::checkout::handlers;
use crate::features::checkout::services::CheckoutService;

/// Public storefront routes for WhatsApp checkout hand-off
pub fn routes(service: Arc<CheckoutService>) -> Router {
    Router::new()
        .route("/api/checkout/whatsapp/build", post(handlers::build_quote_link))
        .route("/api/checkout/whatsapp/ready-pc", post(handlers::ready_pc_link))
        .with_state(service)
}
