use std::fmt;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{SchoolError, SchoolResult};
use crate::time::{hhmm, iso_weekday};

/// Identity of a schedule entry.
///
/// Rows the backend knows about carry their UUID. Placements that only
/// exist in a planner carry a `"temp-N"` string until they are saved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScheduleId {
    Saved(Uuid),
    Temp(String),
}

impl ScheduleId {
    pub fn is_temp(&self) -> bool {
        matches!(self, ScheduleId::Temp(_))
    }

    pub fn saved(&self) -> Option<Uuid> {
        match self {
            ScheduleId::Saved(id) => Some(*id),
            ScheduleId::Temp(_) => None,
        }
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleId::Saved(id) => write!(f, "{}", id),
            ScheduleId::Temp(id) => f.write_str(id),
        }
    }
}

impl From<Uuid> for ScheduleId {
    fn from(id: Uuid) -> Self {
        ScheduleId::Saved(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub section_id: Uuid,
    #[serde(with = "iso_weekday")]
    pub day_of_week: Weekday,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub course_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub teacher_name: Option<String>,
}

impl Schedule {
    pub fn is_temp(&self) -> bool {
        self.id.is_temp()
    }

    pub fn occupies(&self, day: Weekday, start: NaiveTime) -> bool {
        self.day_of_week == day && self.start_time == start
    }

    /// Both a course and a teacher are assigned.
    pub fn is_filled(&self) -> bool {
        self.course_id.is_some() && self.teacher_id.is_some()
    }

    pub fn to_new_schedule(&self) -> NewSchedule {
        NewSchedule {
            section_id: self.section_id,
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
            course_id: self.course_id,
            teacher_id: self.teacher_id,
        }
    }
}

/// Payload for creating or updating a schedule row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSchedule {
    pub section_id: Uuid,
    #[serde(with = "iso_weekday")]
    pub day_of_week: Weekday,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub course_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
}

impl NewSchedule {
    pub fn validate(&self) -> SchoolResult<()> {
        if self.start_time >= self.end_time {
            return Err(SchoolError::Validation(
                "Schedule start time must be before end time".to_string(),
            ));
        }
        if self.course_id.is_none() && self.teacher_id.is_none() {
            return Err(SchoolError::Validation(
                "A schedule needs a course or a teacher".to_string(),
            ));
        }
        Ok(())
    }

    /// Schedules never change section; a payload naming another one is
    /// refused.
    pub fn ensure_section(&self, section_id: Uuid) -> SchoolResult<()> {
        if self.section_id == section_id {
            Ok(())
        } else {
            Err(SchoolError::Validation(format!(
                "Schedule belongs to section {}, not {}",
                section_id, self.section_id
            )))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleChange {
    pub action: ChangeAction,
    pub schedule: Schedule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_schedule: Option<Schedule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MutationResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSaveResponse {
    pub success: bool,
    #[serde(default)]
    pub applied: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
