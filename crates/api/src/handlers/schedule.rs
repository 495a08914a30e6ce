//! # Schedule Handlers
//!
//! Placement of courses and teachers on a section's timetable. Every call
//! goes through the [`ScheduleBackend`](schoolday_core::planner::ScheduleBackend)
//! held in [`ApiState`], so the same rules apply whether a change arrives
//! on its own or as part of a planner's batch.
//!
//! A mutation the backend refuses (a taken cell, an unknown course) is
//! answered with `422` and the backend's `MutationResponse` as body, which
//! is the shape a planner reads its error message from.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use schoolday_core::{
    errors::SchoolError,
    models::schedule::{
        BatchSaveResponse, ChangeAction, MutationResponse, NewSchedule, Schedule, ScheduleChange,
    },
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

pub async fn list_schedules(
    State(state): State<Arc<ApiState>>,
    Path(section_id): Path<Uuid>,
) -> Result<Json<Vec<Schedule>>, AppError> {
    Ok(Json(state.schedules.list_schedules(section_id).await?))
}

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<ApiState>>,
    Path(section_id): Path<Uuid>,
    Json(payload): Json<NewSchedule>,
) -> Result<(StatusCode, Json<MutationResponse>), AppError> {
    payload.ensure_section(section_id)?;
    payload.validate()?;

    let response = state.schedules.create_schedule(payload).await?;
    Ok(mutation_reply(response, StatusCode::CREATED))
}

/// Updates placement and assignments. The backend refuses a payload that
/// names a different section than the stored schedule.
#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NewSchedule>,
) -> Result<(StatusCode, Json<MutationResponse>), AppError> {
    payload.validate()?;

    let response = state.schedules.update_schedule(id, payload).await?;
    Ok(mutation_reply(response, StatusCode::OK))
}

pub async fn delete_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.schedules.delete_schedule(id).await?;
    info!("Deleted schedule {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Applies a planner's pending changes in one transaction.
#[axum::debug_handler]
pub async fn batch_save(
    State(state): State<Arc<ApiState>>,
    Path(section_id): Path<Uuid>,
    Json(changes): Json<Vec<ScheduleChange>>,
) -> Result<(StatusCode, Json<BatchSaveResponse>), AppError> {
    for change in &changes {
        let data = change.schedule.to_new_schedule();
        data.ensure_section(section_id)?;
        if change.action != ChangeAction::Delete {
            data.validate()?;
        } else if change.schedule.is_temp() {
            return Err(SchoolError::Validation(format!(
                "Cannot delete unsaved schedule {}",
                change.schedule.id
            ))
            .into());
        }
    }

    let response = state.schedules.batch_save(&changes).await?;
    if response.success {
        info!(
            "Applied {} schedule changes for section {}",
            response.applied, section_id
        );
        Ok((StatusCode::OK, Json(response)))
    } else {
        warn!(
            "Batch save for section {} rejected: {:?}",
            section_id, response.message
        );
        Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(response)))
    }
}

fn mutation_reply(
    response: MutationResponse,
    success_status: StatusCode,
) -> (StatusCode, Json<MutationResponse>) {
    if response.success {
        (success_status, Json(response))
    } else {
        warn!("Schedule change rejected: {:?}", response.message);
        (StatusCode::UNPROCESSABLE_ENTITY, Json(response))
    }
}
