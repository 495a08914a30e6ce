//! # Course Handlers
//!
//! CRUD over the course catalog. Payloads are validated before any
//! database call so malformed input never reaches Postgres.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use schoolday_core::{
    errors::SchoolError,
    models::catalog::{CatalogFilter, Course, CreateCourseRequest, UpdateCourseRequest},
};
use schoolday_db::repositories::course;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Lists courses, optionally filtered by `?search=` on code or name.
pub async fn list_courses(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<CatalogFilter>,
) -> Result<Json<Vec<Course>>, AppError> {
    let rows = course::list_courses(&state.db_pool, &filter).await?;
    Ok(Json(rows.into_iter().map(Course::from).collect()))
}

pub async fn get_course(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    let row = course::get_course_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| SchoolError::NotFound(format!("Course {} not found", id)))?;
    Ok(Json(row.into()))
}

/// Creates a course. A duplicate code is answered with 409.
#[axum::debug_handler]
pub async fn create_course(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    payload.validate()?;

    let row = course::create_course(&state.db_pool, &payload).await?;
    info!("Created course {} ({})", row.code, row.id);

    Ok((StatusCode::CREATED, Json(row.into())))
}

#[axum::debug_handler]
pub async fn update_course(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<Json<Course>, AppError> {
    payload.validate()?;

    let row = course::update_course(&state.db_pool, id, &payload)
        .await?
        .ok_or_else(|| SchoolError::NotFound(format!("Course {} not found", id)))?;
    Ok(Json(row.into()))
}

pub async fn delete_course(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if course::delete_course(&state.db_pool, id).await? {
        info!("Deleted course {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(SchoolError::NotFound(format!("Course {} not found", id)).into())
    }
}
