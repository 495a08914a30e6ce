use crate::models::DbScheduleConfig;
use eyre::{Result, eyre};
use schoolday_core::{models::time_slot::ScheduleConfig, time::weekday_to_iso};
use sqlx::{Pool, Postgres, types::Json};
use uuid::Uuid;

pub async fn get_schedule_config(
    pool: &Pool<Postgres>,
    section_id: Uuid,
) -> Result<Option<DbScheduleConfig>> {
    let config = sqlx::query_as::<_, DbScheduleConfig>(
        r#"
        SELECT section_id, working_days, start_time, end_time, class_duration, break_slots
        FROM schedule_configs
        WHERE section_id = $1
        "#,
    )
    .bind(section_id)
    .fetch_optional(pool)
    .await?;

    Ok(config)
}

pub async fn upsert_schedule_config(
    pool: &Pool<Postgres>,
    config: &ScheduleConfig,
) -> Result<DbScheduleConfig> {
    let working_days: Vec<i16> = config
        .working_days
        .iter()
        .map(|&d| i16::from(weekday_to_iso(d)))
        .collect();
    let class_duration = i32::try_from(config.class_duration)
        .map_err(|_| eyre!("Class duration {} is too large", config.class_duration))?;

    tracing::debug!(
        "Saving schedule config for section {}: days={:?}, duration={}",
        config.section_id,
        working_days,
        class_duration
    );

    let saved = sqlx::query_as::<_, DbScheduleConfig>(
        r#"
        INSERT INTO schedule_configs
            (section_id, working_days, start_time, end_time, class_duration, break_slots, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW())
        ON CONFLICT (section_id)
        DO UPDATE SET working_days = $2,
                      start_time = $3,
                      end_time = $4,
                      class_duration = $5,
                      break_slots = $6,
                      updated_at = NOW()
        RETURNING section_id, working_days, start_time, end_time, class_duration, break_slots
        "#,
    )
    .bind(config.section_id)
    .bind(working_days)
    .bind(config.start_time)
    .bind(config.end_time)
    .bind(class_duration)
    .bind(Json(&config.break_slots))
    .fetch_one(pool)
    .await?;

    Ok(saved)
}
