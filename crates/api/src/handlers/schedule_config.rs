//! # Timetable Configuration Handlers
//!
//! Per-section working days, school hours, class length and breaks, and the
//! time slots generated from them.

use axum::{
    Json,
    extract::{Path, State},
};
use schoolday_core::{
    errors::SchoolError,
    models::time_slot::{ScheduleConfig, ScheduleConfigRequest, SlotRequest, TimeSlot},
    planner::{GridRow, build_grid},
    slots,
};
use schoolday_db::repositories::schedule_config;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

pub async fn get_schedule_config(
    State(state): State<Arc<ApiState>>,
    Path(section_id): Path<Uuid>,
) -> Result<Json<ScheduleConfig>, AppError> {
    Ok(Json(load_config(&state, section_id).await?))
}

/// Creates or replaces the configuration of a section.
#[axum::debug_handler]
pub async fn put_schedule_config(
    State(state): State<Arc<ApiState>>,
    Path(section_id): Path<Uuid>,
    Json(payload): Json<ScheduleConfigRequest>,
) -> Result<Json<ScheduleConfig>, AppError> {
    let config = payload.into_config(section_id);
    config.validate()?;
    // Reject configurations whose breaks cannot be laid out.
    config.time_slots()?;

    let saved = schedule_config::upsert_schedule_config(&state.db_pool, &config).await?;
    info!("Updated schedule config for section {}", section_id);

    Ok(Json(ScheduleConfig::try_from(saved)?))
}

/// Slots generated from the section's stored configuration.
pub async fn get_time_slots(
    State(state): State<Arc<ApiState>>,
    Path(section_id): Path<Uuid>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let config = load_config(&state, section_id).await?;
    Ok(Json(config.time_slots()?))
}

/// Generates slots for an unsaved configuration. Touches no storage.
pub async fn preview_time_slots(
    Json(payload): Json<SlotRequest>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    Ok(Json(slots::generate(&payload)?))
}

/// The section's timetable as rows of slots by working day.
pub async fn get_grid(
    State(state): State<Arc<ApiState>>,
    Path(section_id): Path<Uuid>,
) -> Result<Json<Vec<GridRow>>, AppError> {
    let config = load_config(&state, section_id).await?;
    let schedules = state.schedules.list_schedules(section_id).await?;
    Ok(Json(build_grid(&config, &schedules)?))
}

async fn load_config(state: &ApiState, section_id: Uuid) -> Result<ScheduleConfig, AppError> {
    let row = schedule_config::get_schedule_config(&state.db_pool, section_id)
        .await?
        .ok_or_else(|| {
            SchoolError::NotFound(format!(
                "Section {} has no schedule configuration",
                section_id
            ))
        })?;
    Ok(ScheduleConfig::try_from(row)?)
}
