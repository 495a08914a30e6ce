use crate::models::DbCourse;
use chrono::Utc;
use eyre::Result;
use schoolday_core::models::catalog::{CatalogFilter, CreateCourseRequest, UpdateCourseRequest};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_courses(pool: &Pool<Postgres>, filter: &CatalogFilter) -> Result<Vec<DbCourse>> {
    let courses = sqlx::query_as::<_, DbCourse>(
        r#"
        SELECT id, code, name, description, credits, created_at
        FROM courses
        WHERE $1::text IS NULL OR name ILIKE $1 OR code ILIKE $1
        ORDER BY code ASC
        LIMIT $2
        "#,
    )
    .bind(filter.search_pattern())
    .bind(filter.limit_or_default())
    .fetch_all(pool)
    .await?;

    Ok(courses)
}

pub async fn get_course_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbCourse>> {
    tracing::debug!("Getting course by id: {}", id);

    let course = sqlx::query_as::<_, DbCourse>(
        r#"
        SELECT id, code, name, description, credits, created_at
        FROM courses
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(course)
}

pub async fn create_course(pool: &Pool<Postgres>, request: &CreateCourseRequest) -> Result<DbCourse> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating course: id={}, code={}", id, request.code);

    let course = sqlx::query_as::<_, DbCourse>(
        r#"
        INSERT INTO courses (id, code, name, description, credits, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, code, name, description, credits, created_at
        "#,
    )
    .bind(id)
    .bind(request.code.trim())
    .bind(request.name.trim())
    .bind(&request.description)
    .bind(request.credits)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(course)
}

/// Applies the fields present in `request`; `None` when the course does not
/// exist.
pub async fn update_course(
    pool: &Pool<Postgres>,
    id: Uuid,
    request: &UpdateCourseRequest,
) -> Result<Option<DbCourse>> {
    let course = sqlx::query_as::<_, DbCourse>(
        r#"
        UPDATE courses
        SET code = COALESCE($2, code),
            name = COALESCE($3, name),
            description = COALESCE($4, description),
            credits = COALESCE($5, credits)
        WHERE id = $1
        RETURNING id, code, name, description, credits, created_at
        "#,
    )
    .bind(id)
    .bind(request.code.as_deref().map(str::trim))
    .bind(request.name.as_deref().map(str::trim))
    .bind(&request.description)
    .bind(request.credits)
    .fetch_optional(pool)
    .await?;

    Ok(course)
}

/// Returns whether a row was deleted.
pub async fn delete_course(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM courses
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
