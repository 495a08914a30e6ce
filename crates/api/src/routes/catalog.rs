use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/sections", get(handlers::catalog::list_sections))
        .route("/api/teachers", get(handlers::catalog::list_teachers))
}
