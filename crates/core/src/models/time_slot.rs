use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{SchoolError, SchoolResult};
use crate::time::{MINUTES_PER_DAY, hhmm, iso_weekdays};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    pub label: String,
    pub is_break: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakSlot {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    #[serde(default)]
    pub label: String,
}

/// Generator input as it arrives from a form, times still unparsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRequest {
    pub start_time: String,
    pub end_time: String,
    pub class_duration: u32,
    #[serde(default)]
    pub break_slots: Vec<RawBreakSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBreakSlot {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub label: String,
}

/// Per-section timetable configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub section_id: Uuid,
    #[serde(with = "iso_weekdays")]
    pub working_days: Vec<Weekday>,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub class_duration: u32,
    #[serde(default)]
    pub break_slots: Vec<BreakSlot>,
}

impl ScheduleConfig {
    pub fn validate(&self) -> SchoolResult<()> {
        if self.working_days.is_empty() {
            return Err(SchoolError::Validation(
                "At least one working day is required".to_string(),
            ));
        }
        if self.start_time >= self.end_time {
            return Err(SchoolError::Validation(
                "Start time must be before end time".to_string(),
            ));
        }
        if self.class_duration == 0 {
            return Err(SchoolError::Validation(
                "Class duration must be greater than zero".to_string(),
            ));
        }
        if self.class_duration > MINUTES_PER_DAY {
            return Err(SchoolError::Validation(format!(
                "Class duration of {} minutes is longer than a day",
                self.class_duration
            )));
        }
        for brk in &self.break_slots {
            if brk.start >= brk.end {
                return Err(SchoolError::Validation(format!(
                    "Break '{}' must start before it ends",
                    brk.label
                )));
            }
        }
        Ok(())
    }

    /// Class and break slots covering one working day.
    pub fn time_slots(&self) -> SchoolResult<Vec<TimeSlot>> {
        crate::slots::generate_slots(
            self.start_time,
            self.end_time,
            self.class_duration,
            &self.break_slots,
        )
    }

    pub fn is_working_day(&self, day: Weekday) -> bool {
        self.working_days.contains(&day)
    }
}

/// Body of `PUT /api/sections/:id/schedule-config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfigRequest {
    #[serde(with = "iso_weekdays")]
    pub working_days: Vec<Weekday>,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub class_duration: u32,
    #[serde(default)]
    pub break_slots: Vec<BreakSlot>,
}

impl ScheduleConfigRequest {
    pub fn into_config(self, section_id: Uuid) -> ScheduleConfig {
        ScheduleConfig {
            section_id,
            working_days: self.working_days,
            start_time: self.start_time,
            end_time: self.end_time,
            class_duration: self.class_duration,
            break_slots: self.break_slots,
        }
    }
}
