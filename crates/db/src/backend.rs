//! PostgreSQL implementation of the planner's [`ScheduleBackend`].
//!
//! Request-level problems (invalid payloads, a taken cell, a missing row on
//! update) come back as unsuccessful responses so a planner can show the
//! message. Infrastructure failures are errors.

use async_trait::async_trait;
use schoolday_core::{
    errors::{SchoolError, SchoolResult},
    models::schedule::{
        BatchSaveResponse, ChangeAction, MutationResponse, NewSchedule, Schedule, ScheduleChange,
    },
    planner::ScheduleBackend,
};
use uuid::Uuid;

use crate::{DbPool, is_foreign_key_violation, is_unique_violation, repositories::schedule};

const CELL_TAKEN: &str = "That time slot is already taken";
const UNKNOWN_REFERENCE: &str = "Section, course or teacher does not exist";

#[derive(Clone)]
pub struct PgScheduleBackend {
    pool: DbPool,
}

impl PgScheduleBackend {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleBackend for PgScheduleBackend {
    fn supports_batch(&self) -> bool {
        true
    }

    async fn create_schedule(&self, data: NewSchedule) -> SchoolResult<MutationResponse> {
        if let Err(SchoolError::Validation(message)) = data.validate() {
            return Ok(MutationResponse::rejected(message));
        }

        match schedule::create_schedule(&self.pool, &data).await {
            Ok(_) => Ok(MutationResponse::ok()),
            Err(err) => rejection_or_error(err),
        }
    }

    async fn update_schedule(&self, id: Uuid, data: NewSchedule) -> SchoolResult<MutationResponse> {
        if let Err(SchoolError::Validation(message)) = data.validate() {
            return Ok(MutationResponse::rejected(message));
        }

        let existing = match schedule::get_schedule_by_id(&self.pool, id).await? {
            Some(existing) => existing,
            None => {
                return Ok(MutationResponse::rejected(format!(
                    "Schedule {} not found",
                    id
                )));
            }
        };
        if let Err(SchoolError::Validation(message)) = data.ensure_section(existing.section_id) {
            return Ok(MutationResponse::rejected(message));
        }

        match schedule::update_schedule(&self.pool, id, &data).await {
            Ok(Some(_)) => Ok(MutationResponse::ok()),
            Ok(None) => Ok(MutationResponse::rejected(format!(
                "Schedule {} not found",
                id
            ))),
            Err(err) => rejection_or_error(err),
        }
    }

    async fn delete_schedule(&self, id: Uuid) -> SchoolResult<()> {
        if schedule::delete_schedule(&self.pool, id).await? {
            Ok(())
        } else {
            Err(SchoolError::NotFound(format!("Schedule {} not found", id)))
        }
    }

    async fn batch_save(&self, changes: &[ScheduleChange]) -> SchoolResult<BatchSaveResponse> {
        for change in changes.iter().filter(|c| c.action != ChangeAction::Delete) {
            if let Err(SchoolError::Validation(message)) = change.schedule.to_new_schedule().validate() {
                return Ok(BatchSaveResponse {
                    success: false,
                    applied: 0,
                    message: Some(message),
                });
            }
        }

        match schedule::apply_changes(&self.pool, changes).await {
            Ok(applied) => Ok(BatchSaveResponse {
                success: true,
                applied,
                message: None,
            }),
            Err(err) => match rejection_message(&err) {
                Some(message) => Ok(BatchSaveResponse {
                    success: false,
                    applied: 0,
                    message: Some(message.to_string()),
                }),
                None if err.downcast_ref::<sqlx::Error>().is_none() => Ok(BatchSaveResponse {
                    success: false,
                    applied: 0,
                    message: Some(err.to_string()),
                }),
                None => Err(SchoolError::Database(err)),
            },
        }
    }

    async fn list_schedules(&self, section_id: Uuid) -> SchoolResult<Vec<Schedule>> {
        let rows = schedule::list_schedules_by_section(&self.pool, section_id).await?;
        rows.into_iter()
            .map(|row| Schedule::try_from(row).map_err(SchoolError::Database))
            .collect()
    }
}

fn rejection_message(err: &eyre::Report) -> Option<&'static str> {
    if is_unique_violation(err) {
        Some(CELL_TAKEN)
    } else if is_foreign_key_violation(err) {
        Some(UNKNOWN_REFERENCE)
    } else {
        None
    }
}

fn rejection_or_error(err: eyre::Report) -> SchoolResult<MutationResponse> {
    match rejection_message(&err) {
        Some(message) => Ok(MutationResponse::rejected(message)),
        None => Err(SchoolError::Database(err)),
    }
}
