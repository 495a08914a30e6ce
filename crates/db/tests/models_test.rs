use chrono::{NaiveTime, Utc, Weekday};
use pretty_assertions::assert_eq;
use rstest::rstest;
use schoolday_core::models::{
    catalog::Course,
    schedule::{Schedule, ScheduleId},
    time_slot::{BreakSlot, ScheduleConfig},
};
use schoolday_db::models::{DbCourse, DbSchedule, DbScheduleConfig};
use sqlx::types::Json;
use uuid::Uuid;

fn t(value: &str) -> NaiveTime {
    NaiveTime::parse_from_str(value, "%H:%M").unwrap()
}

fn db_schedule(day_of_week: i16) -> DbSchedule {
    DbSchedule {
        id: Uuid::new_v4(),
        section_id: Uuid::new_v4(),
        day_of_week,
        start_time: t("08:00"),
        end_time: t("08:45"),
        course_id: Some(Uuid::new_v4()),
        teacher_id: None,
        course_name: Some("Physics".to_string()),
        teacher_name: None,
    }
}

#[test]
fn test_db_schedule_converts_to_saved_schedule() {
    let row = db_schedule(5);
    let id = row.id;

    let schedule = Schedule::try_from(row).unwrap();

    assert_eq!(schedule.id, ScheduleId::Saved(id));
    assert_eq!(schedule.day_of_week, Weekday::Fri);
    assert_eq!(schedule.course_name.as_deref(), Some("Physics"));
    assert!(!schedule.is_temp());
}

#[rstest]
#[case(0)]
#[case(8)]
#[case(-1)]
fn test_db_schedule_with_bad_weekday_fails(#[case] day: i16) {
    assert!(Schedule::try_from(db_schedule(day)).is_err());
}

#[test]
fn test_db_schedule_config_conversion() {
    let section_id = Uuid::new_v4();
    let row = DbScheduleConfig {
        section_id,
        working_days: vec![5, 1, 1, 3],
        start_time: t("07:30"),
        end_time: t("12:00"),
        class_duration: 45,
        break_slots: Json(vec![BreakSlot {
            start: t("09:00"),
            end: t("09:20"),
            label: "Recess".to_string(),
        }]),
    };

    let config = ScheduleConfig::try_from(row).unwrap();

    assert_eq!(config.section_id, section_id);
    assert_eq!(
        config.working_days,
        vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]
    );
    assert_eq!(config.class_duration, 45);
    assert_eq!(config.break_slots.len(), 1);
    assert!(config.validate().is_ok());
}

#[test]
fn test_db_schedule_config_negative_duration_fails() {
    let row = DbScheduleConfig {
        section_id: Uuid::new_v4(),
        working_days: vec![1],
        start_time: t("07:30"),
        end_time: t("12:00"),
        class_duration: -5,
        break_slots: Json(vec![]),
    };

    assert!(ScheduleConfig::try_from(row).is_err());
}

#[test]
fn test_db_course_conversion() {
    let row = DbCourse {
        id: Uuid::new_v4(),
        code: "BIO-201".to_string(),
        name: "Cell Biology".to_string(),
        description: Some("Lab course".to_string()),
        credits: 3,
        created_at: Utc::now(),
    };
    let expected_id = row.id;

    let course = Course::from(row);

    assert_eq!(course.id, expected_id);
    assert_eq!(course.code, "BIO-201");
    assert_eq!(course.credits, 3);
}
