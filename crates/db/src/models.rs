use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::{Result, eyre};
use schoolday_core::{
    models::{
        attendance::{AttendanceRecord, AttendanceStatus},
        catalog::{Course, Section, Teacher},
        schedule::{Schedule, ScheduleId},
        time_slot::{BreakSlot, ScheduleConfig},
    },
    time::weekday_from_iso,
};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCourse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: i32,
    pub created_at: DateTime<Utc>,
}

impl From<DbCourse> for Course {
    fn from(row: DbCourse) -> Self {
        Course {
            id: row.id,
            code: row.code,
            name: row.name,
            description: row.description,
            credits: row.credits,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSection {
    pub id: Uuid,
    pub name: String,
    pub grade: Option<String>,
}

impl From<DbSection> for Section {
    fn from(row: DbSection) -> Self {
        Section {
            id: row.id,
            name: row.name,
            grade: row.grade,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTeacher {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
}

impl From<DbTeacher> for Teacher {
    fn from(row: DbTeacher) -> Self {
        Teacher {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbScheduleConfig {
    pub section_id: Uuid,
    pub working_days: Vec<i16>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub class_duration: i32,
    pub break_slots: Json<Vec<BreakSlot>>,
}

impl TryFrom<DbScheduleConfig> for ScheduleConfig {
    type Error = eyre::Report;

    fn try_from(row: DbScheduleConfig) -> Result<Self> {
        let mut working_days = row
            .working_days
            .iter()
            .map(|&d| iso_weekday(d))
            .collect::<Result<Vec<_>>>()?;
        working_days.sort_by_key(|d| d.number_from_monday());
        working_days.dedup();

        let class_duration = u32::try_from(row.class_duration)
            .map_err(|_| eyre!("Invalid class duration {}", row.class_duration))?;

        Ok(ScheduleConfig {
            section_id: row.section_id,
            working_days,
            start_time: row.start_time,
            end_time: row.end_time,
            class_duration,
            break_slots: row.break_slots.0,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSchedule {
    pub id: Uuid,
    pub section_id: Uuid,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub course_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub course_name: Option<String>,
    pub teacher_name: Option<String>,
}

impl TryFrom<DbSchedule> for Schedule {
    type Error = eyre::Report;

    fn try_from(row: DbSchedule) -> Result<Self> {
        Ok(Schedule {
            id: ScheduleId::Saved(row.id),
            section_id: row.section_id,
            day_of_week: iso_weekday(row.day_of_week)?,
            start_time: row.start_time,
            end_time: row.end_time,
            course_id: row.course_id,
            teacher_id: row.teacher_id,
            course_name: row.course_name,
            teacher_name: row.teacher_name,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAttendanceStatus {
    pub code: String,
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_negative: bool,
    pub is_excused: bool,
}

impl From<DbAttendanceStatus> for AttendanceStatus {
    fn from(row: DbAttendanceStatus) -> Self {
        AttendanceStatus {
            code: row.code,
            name: row.name,
            color: row.color,
            icon: row.icon,
            is_negative: row.is_negative,
            is_excused: row.is_excused,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAttendanceRecord {
    pub student_id: Uuid,
    pub section_id: Uuid,
    pub date: NaiveDate,
    pub status_code: String,
}

impl From<DbAttendanceRecord> for AttendanceRecord {
    fn from(row: DbAttendanceRecord) -> Self {
        AttendanceRecord {
            student_id: row.student_id,
            section_id: row.section_id,
            date: row.date,
            status_code: row.status_code,
        }
    }
}

fn iso_weekday(value: i16) -> Result<chrono::Weekday> {
    let number = u8::try_from(value).map_err(|_| eyre!("Invalid day of week {}", value))?;
    weekday_from_iso(number).map_err(|e| eyre!("{}", e))
}
