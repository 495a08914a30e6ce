use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use schoolday_core::{
    attendance::{AttendanceStats, StatusPalette},
    models::attendance::{AttendanceRecord, AttendanceStatus},
};
use uuid::Uuid;

fn status(code: &str, color: Option<&str>, is_negative: bool, is_excused: bool) -> AttendanceStatus {
    AttendanceStatus {
        code: code.to_string(),
        name: code.to_uppercase(),
        color: color.map(str::to_string),
        icon: None,
        is_negative,
        is_excused,
    }
}

fn statuses() -> Vec<AttendanceStatus> {
    vec![
        status("present", Some("#00ff00"), false, false),
        status("late", None, false, false),
        status("absent", None, true, false),
        status("sick", None, true, true),
    ]
}

fn record(code: &str) -> AttendanceRecord {
    AttendanceRecord {
        student_id: Uuid::new_v4(),
        section_id: Uuid::nil(),
        date: NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
        status_code: code.to_string(),
    }
}

#[test]
fn test_palette_fills_in_defaults() {
    let palette = StatusPalette::from_statuses(&statuses());

    assert_eq!(palette.displays().len(), 4);
    assert_eq!(palette.get("present").unwrap().color, "#00ff00");
    assert_eq!(palette.get("late").unwrap().color, "#16a34a");
    assert_eq!(palette.get("absent").unwrap().color, "#dc2626");
    assert_eq!(palette.get("sick").unwrap().color, "#d97706");
    assert_eq!(palette.get("sick").unwrap().icon, "circle");
    assert_eq!(palette.get("absent").unwrap().label, "ABSENT");
    assert!(palette.get("missing").is_none());
}

#[test]
fn test_palette_keeps_first_of_duplicate_codes() {
    let mut list = statuses();
    list.push(status("present", Some("#123456"), true, false));

    let palette = StatusPalette::from_statuses(&list);
    assert_eq!(palette.displays().len(), 4);
    assert_eq!(palette.get("present").unwrap().color, "#00ff00");
}

#[test]
fn test_stats_single_pass_counts() {
    let palette = StatusPalette::from_statuses(&statuses());
    let records: Vec<AttendanceRecord> = ["present", "present", "late", "absent", "sick", "holiday"]
        .iter()
        .map(|code| record(code))
        .collect();

    let stats = AttendanceStats::compute(&records, &palette);

    assert_eq!(stats.total, 6);
    assert_eq!(stats.present, 3);
    assert_eq!(stats.absent, 1);
    assert_eq!(stats.excused, 1);
    assert_eq!(stats.unknown, 1);
    assert_eq!(stats.per_status.get("present"), Some(&2));
    assert_eq!(stats.per_status.get("holiday"), Some(&1));
    assert!((stats.attendance_rate - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_stats_empty() {
    let palette = StatusPalette::from_statuses(&statuses());
    let stats = AttendanceStats::compute(&[], &palette);

    assert_eq!(stats.total, 0);
    assert_eq!(stats.attendance_rate, 0.0);
}
