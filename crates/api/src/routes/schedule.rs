use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{
    ApiState,
    handlers::{schedule, schedule_config},
};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        // Timetable configuration
        .route(
            "/api/sections/:id/schedule-config",
            get(schedule_config::get_schedule_config).put(schedule_config::put_schedule_config),
        )
        .route(
            "/api/sections/:id/time-slots",
            get(schedule_config::get_time_slots),
        )
        .route(
            "/api/time-slots/preview",
            post(schedule_config::preview_time_slots),
        )
        .route("/api/sections/:id/grid", get(schedule_config::get_grid))
        // Placements
        .route(
            "/api/sections/:id/schedules",
            get(schedule::list_schedules).post(schedule::create_schedule),
        )
        .route(
            "/api/sections/:id/schedules/batch",
            post(schedule::batch_save),
        )
        .route(
            "/api/schedules/:id",
            put(schedule::update_schedule).delete(schedule::delete_schedule),
        )
}
