use axum::{
    Json,
    extract::{Query, State},
};
use schoolday_core::models::catalog::{CatalogFilter, Section, Teacher};
use schoolday_db::repositories::catalog;
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

pub async fn list_sections(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<CatalogFilter>,
) -> Result<Json<Vec<Section>>, AppError> {
    let rows = catalog::list_sections(&state.db_pool, &filter).await?;
    Ok(Json(rows.into_iter().map(Section::from).collect()))
}

pub async fn list_teachers(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<CatalogFilter>,
) -> Result<Json<Vec<Teacher>>, AppError> {
    let rows = catalog::list_teachers(&state.db_pool, &filter).await?;
    Ok(Json(rows.into_iter().map(Teacher::from).collect()))
}
