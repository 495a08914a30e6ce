use axum::{
    Json,
    extract::{Path, Query, State},
};
use schoolday_core::{
    attendance::{AttendanceStats, StatusDisplay, StatusPalette},
    errors::SchoolError,
    models::attendance::{AttendanceRecord, AttendanceStatsQuery, AttendanceStatus},
};
use schoolday_db::repositories::attendance;
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Display descriptors for every configured status, in configured order.
pub async fn list_statuses(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<StatusDisplay>>, AppError> {
    let palette = load_palette(&state).await?;
    Ok(Json(palette.displays().to_vec()))
}

/// Attendance totals for a section over an optional inclusive date range.
pub async fn section_stats(
    State(state): State<Arc<ApiState>>,
    Path(section_id): Path<Uuid>,
    Query(query): Query<AttendanceStatsQuery>,
) -> Result<Json<AttendanceStats>, AppError> {
    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return Err(SchoolError::Validation(format!(
                "Range start {} is after range end {}",
                from, to
            ))
            .into());
        }
    }

    let palette = load_palette(&state).await?;
    let records: Vec<AttendanceRecord> =
        attendance::list_records(&state.db_pool, section_id, query.from, query.to)
            .await?
            .into_iter()
            .map(AttendanceRecord::from)
            .collect();

    Ok(Json(AttendanceStats::compute(&records, &palette)))
}

async fn load_palette(state: &ApiState) -> Result<StatusPalette, AppError> {
    let statuses: Vec<AttendanceStatus> = attendance::list_statuses(&state.db_pool)
        .await?
        .into_iter()
        .map(AttendanceStatus::from)
        .collect();
    Ok(StatusPalette::from_statuses(&statuses))
}
