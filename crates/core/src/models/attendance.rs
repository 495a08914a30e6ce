use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Attendance status as configured on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceStatus {
    pub code: String,
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_negative: bool,
    pub is_excused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub student_id: Uuid,
    pub section_id: Uuid,
    pub date: NaiveDate,
    pub status_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceStatsQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
