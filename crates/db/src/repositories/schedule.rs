use crate::models::DbSchedule;
use chrono::Utc;
use eyre::{Result, eyre};
use schoolday_core::{
    models::schedule::{ChangeAction, NewSchedule, ScheduleChange},
    time::weekday_to_iso,
};
use sqlx::{Pool, Postgres, Transaction, postgres::PgExecutor};
use uuid::Uuid;

pub async fn list_schedules_by_section(
    pool: &Pool<Postgres>,
    section_id: Uuid,
) -> Result<Vec<DbSchedule>> {
    let schedules = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT s.id, s.section_id, s.day_of_week, s.start_time, s.end_time,
               s.course_id, s.teacher_id,
               c.name AS course_name, t.name AS teacher_name
        FROM schedules s
        LEFT JOIN courses c ON c.id = s.course_id
        LEFT JOIN teachers t ON t.id = s.teacher_id
        WHERE s.section_id = $1
        ORDER BY s.day_of_week ASC, s.start_time ASC
        "#,
    )
    .bind(section_id)
    .fetch_all(pool)
    .await?;

    Ok(schedules)
}

pub async fn get_schedule_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<DbSchedule>>
where
    E: PgExecutor<'e>,
{
    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT s.id, s.section_id, s.day_of_week, s.start_time, s.end_time,
               s.course_id, s.teacher_id,
               c.name AS course_name, t.name AS teacher_name
        FROM schedules s
        LEFT JOIN courses c ON c.id = s.course_id
        LEFT JOIN teachers t ON t.id = s.teacher_id
        WHERE s.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(schedule)
}

pub async fn create_schedule<'e, E>(executor: E, data: &NewSchedule) -> Result<DbSchedule>
where
    E: PgExecutor<'e>,
{
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating schedule: id={}, section={}, day={}, start={}",
        id,
        data.section_id,
        data.day_of_week,
        data.start_time
    );

    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        WITH inserted AS (
            INSERT INTO schedules
                (id, section_id, day_of_week, start_time, end_time, course_id, teacher_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
        )
        SELECT i.id, i.section_id, i.day_of_week, i.start_time, i.end_time,
               i.course_id, i.teacher_id,
               c.name AS course_name, t.name AS teacher_name
        FROM inserted i
        LEFT JOIN courses c ON c.id = i.course_id
        LEFT JOIN teachers t ON t.id = i.teacher_id
        "#,
    )
    .bind(id)
    .bind(data.section_id)
    .bind(i16::from(weekday_to_iso(data.day_of_week)))
    .bind(data.start_time)
    .bind(data.end_time)
    .bind(data.course_id)
    .bind(data.teacher_id)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(schedule)
}

/// Overwrites placement and assignments. The section is fixed: `None` when
/// no schedule with this id exists in `data.section_id`.
pub async fn update_schedule<'e, E>(
    executor: E,
    id: Uuid,
    data: &NewSchedule,
) -> Result<Option<DbSchedule>>
where
    E: PgExecutor<'e>,
{
    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        WITH updated AS (
            UPDATE schedules
            SET day_of_week = $3,
                start_time = $4,
                end_time = $5,
                course_id = $6,
                teacher_id = $7
            WHERE id = $1 AND section_id = $2
            RETURNING *
        )
        SELECT u.id, u.section_id, u.day_of_week, u.start_time, u.end_time,
               u.course_id, u.teacher_id,
               c.name AS course_name, t.name AS teacher_name
        FROM updated u
        LEFT JOIN courses c ON c.id = u.course_id
        LEFT JOIN teachers t ON t.id = u.teacher_id
        "#,
    )
    .bind(id)
    .bind(data.section_id)
    .bind(i16::from(weekday_to_iso(data.day_of_week)))
    .bind(data.start_time)
    .bind(data.end_time)
    .bind(data.course_id)
    .bind(data.teacher_id)
    .fetch_optional(executor)
    .await?;

    Ok(schedule)
}

/// Returns whether a row was deleted.
pub async fn delete_schedule<'e, E>(executor: E, id: Uuid) -> Result<bool>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        DELETE FROM schedules
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Applies a planner's change log in one transaction. Either every change
/// lands or none does.
///
/// # Errors
///
/// Fails if an `update`/`delete` targets an unsaved or missing schedule, or
/// if the resulting timetable puts two schedules in one cell.
pub async fn apply_changes(pool: &Pool<Postgres>, changes: &[ScheduleChange]) -> Result<usize> {
    let mut tx = pool.begin().await?;

    for change in changes {
        let data = change.schedule.to_new_schedule();
        match change.action {
            ChangeAction::Create => {
                create_schedule(&mut *tx, &data).await?;
            }
            ChangeAction::Update => {
                let id = existing_in_section(&mut tx, change).await?;
                update_schedule(&mut *tx, id, &data)
                    .await?
                    .ok_or_else(|| eyre!("Schedule {} not found", id))?;
            }
            ChangeAction::Delete => {
                let id = existing_in_section(&mut tx, change).await?;
                if !delete_schedule(&mut *tx, id).await? {
                    return Err(eyre!("Schedule {} not found", id));
                }
            }
        }
    }

    tx.commit().await?;

    tracing::info!("Applied {} schedule changes", changes.len());
    Ok(changes.len())
}

/// Id of the saved row `change` targets, after checking it lives in the
/// section the change claims.
async fn existing_in_section(
    tx: &mut Transaction<'_, Postgres>,
    change: &ScheduleChange,
) -> Result<Uuid> {
    let id = saved_id(change)?;
    let existing = get_schedule_by_id(&mut **tx, id)
        .await?
        .ok_or_else(|| eyre!("Schedule {} not found", id))?;
    change
        .schedule
        .to_new_schedule()
        .ensure_section(existing.section_id)?;
    Ok(id)
}

fn saved_id(change: &ScheduleChange) -> Result<Uuid> {
    change
        .schedule
        .id
        .saved()
        .ok_or_else(|| eyre!("Schedule {} has not been saved yet", change.schedule.id))
}
