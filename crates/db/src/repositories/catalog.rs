use crate::models::{DbSection, DbTeacher};
use eyre::Result;
use schoolday_core::models::catalog::CatalogFilter;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

// Section Repository

pub async fn list_sections(pool: &Pool<Postgres>, filter: &CatalogFilter) -> Result<Vec<DbSection>> {
    let sections = sqlx::query_as::<_, DbSection>(
        r#"
        SELECT id, name, grade
        FROM sections
        WHERE $1::text IS NULL OR name ILIKE $1
        ORDER BY name ASC
        LIMIT $2
        "#,
    )
    .bind(filter.search_pattern())
    .bind(filter.limit_or_default())
    .fetch_all(pool)
    .await?;

    Ok(sections)
}

pub async fn get_section_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSection>> {
    let section = sqlx::query_as::<_, DbSection>(
        r#"
        SELECT id, name, grade
        FROM sections
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(section)
}

// Teacher Repository

pub async fn list_teachers(pool: &Pool<Postgres>, filter: &CatalogFilter) -> Result<Vec<DbTeacher>> {
    let teachers = sqlx::query_as::<_, DbTeacher>(
        r#"
        SELECT id, name, email
        FROM teachers
        WHERE $1::text IS NULL OR name ILIKE $1 OR email ILIKE $1
        ORDER BY name ASC
        LIMIT $2
        "#,
    )
    .bind(filter.search_pattern())
    .bind(filter.limit_or_default())
    .fetch_all(pool)
    .await?;

    Ok(teachers)
}

pub async fn get_teacher_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbTeacher>> {
    let teacher = sqlx::query_as::<_, DbTeacher>(
        r#"
        SELECT id, name, email
        FROM teachers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(teacher)
}
