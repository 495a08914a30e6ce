use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/attendance/statuses",
            get(handlers::attendance::list_statuses),
        )
        .route(
            "/api/sections/:id/attendance/stats",
            get(handlers::attendance::section_stats),
        )
}
