use crate::models::{DbAttendanceRecord, DbAttendanceStatus};
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_statuses(pool: &Pool<Postgres>) -> Result<Vec<DbAttendanceStatus>> {
    let statuses = sqlx::query_as::<_, DbAttendanceStatus>(
        r#"
        SELECT code, name, color, icon, is_negative, is_excused
        FROM attendance_statuses
        ORDER BY sort_order ASC, code ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(statuses)
}

/// Records for a section, optionally bounded by an inclusive date range.
pub async fn list_records(
    pool: &Pool<Postgres>,
    section_id: Uuid,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<DbAttendanceRecord>> {
    let records = sqlx::query_as::<_, DbAttendanceRecord>(
        r#"
        SELECT student_id, section_id, date, status_code
        FROM attendance_records
        WHERE section_id = $1
          AND ($2::date IS NULL OR date >= $2)
          AND ($3::date IS NULL OR date <= $3)
        ORDER BY date ASC
        "#,
    )
    .bind(section_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(records)
}
