use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::hotspots::handlers;
use crate::features::hotspots::services::HotspotService;

/// Create public hotspot routes
pub fn routes(service: Arc<HotspotService>) -> Router {
    Router::new()
        .route("/api/hotspots", get(handlers::list_hotspots))
        .route("/api/hotspots/{id}", get(handlers::get_hotspot))
        .with_state(service)
}
