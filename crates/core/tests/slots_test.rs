use pretty_assertions::assert_eq;
use rstest::rstest;
use schoolday_core::{
    errors::SchoolError,
    models::time_slot::{RawBreakSlot, SlotRequest, TimeSlot},
    slots::generate,
    time::format_hhmm,
};

fn request(start: &str, end: &str, duration: u32, breaks: &[(&str, &str, &str)]) -> SlotRequest {
    SlotRequest {
        start_time: start.to_string(),
        end_time: end.to_string(),
        class_duration: duration,
        break_slots: breaks
            .iter()
            .map(|(start, end, label)| RawBreakSlot {
                start: start.to_string(),
                end: end.to_string(),
                label: label.to_string(),
            })
            .collect(),
    }
}

fn spans(slots: &[TimeSlot]) -> Vec<(String, String, bool)> {
    slots
        .iter()
        .map(|s| (format_hhmm(s.start), format_hhmm(s.end), s.is_break))
        .collect()
}

fn span(start: &str, end: &str, is_break: bool) -> (String, String, bool) {
    (start.to_string(), end.to_string(), is_break)
}

#[test]
fn test_two_hour_window_without_breaks() {
    let slots = generate(&request("08:00", "10:00", 60, &[])).unwrap();

    assert_eq!(
        spans(&slots),
        vec![span("08:00", "09:00", false), span("09:00", "10:00", false)]
    );
    assert_eq!(slots[0].label, "08:00 - 09:00");
    assert_eq!(slots[1].label, "09:00 - 10:00");
}

#[test]
fn test_break_jumps_cursor_and_trailing_class_is_dropped() {
    let slots = generate(&request(
        "08:00",
        "10:00",
        60,
        &[("09:00", "09:15", "Recess")],
    ))
    .unwrap();

    // 09:15-10:15 would cross the window end, so it is not emitted.
    assert_eq!(
        spans(&slots),
        vec![span("08:00", "09:00", false), span("09:00", "09:15", true)]
    );
    assert_eq!(slots[1].label, "Recess");
}

#[rstest]
#[case("10:00", "09:00")]
#[case("09:00", "09:00")]
fn test_empty_window(#[case] start: &str, #[case] end: &str) {
    let slots = generate(&request(start, end, 45, &[])).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn test_short_break_is_its_own_slot() {
    let slots = generate(&request(
        "08:00",
        "11:00",
        50,
        &[("08:50", "09:00", "")],
    ))
    .unwrap();

    assert_eq!(
        spans(&slots),
        vec![
            span("08:00", "08:50", false),
            span("08:50", "09:00", true),
            span("09:00", "09:50", false),
            span("09:50", "10:40", false),
        ]
    );
    assert_eq!(slots[1].label, "Break");
}

#[test]
fn test_overlapping_breaks_are_merged() {
    let slots = generate(&request(
        "08:00",
        "12:00",
        60,
        &[("10:15", "10:45", "Snack"), ("10:00", "10:30", "Recess")],
    ))
    .unwrap();

    assert_eq!(
        spans(&slots),
        vec![
            span("08:00", "09:00", false),
            span("09:00", "10:00", false),
            span("10:00", "10:45", true),
            span("10:45", "11:45", false),
        ]
    );
    assert_eq!(slots[2].label, "Recess");
}

#[test]
fn test_break_starting_mid_class_leaves_gap() {
    let slots = generate(&request(
        "08:00",
        "10:00",
        60,
        &[("08:30", "08:45", "Assembly")],
    ))
    .unwrap();

    assert_eq!(
        spans(&slots),
        vec![span("08:30", "08:45", true), span("08:45", "09:45", false)]
    );
}

#[test]
fn test_break_outside_window_is_ignored() {
    let slots = generate(&request(
        "08:00",
        "10:00",
        60,
        &[("12:00", "13:00", "Lunch"), ("07:00", "07:30", "Early")],
    ))
    .unwrap();

    assert_eq!(
        spans(&slots),
        vec![span("08:00", "09:00", false), span("09:00", "10:00", false)]
    );
}

#[test]
fn test_break_running_past_window_is_clamped() {
    let slots = generate(&request(
        "08:00",
        "10:00",
        60,
        &[("09:30", "10:30", "Lunch")],
    ))
    .unwrap();

    assert_eq!(
        spans(&slots),
        vec![span("08:00", "09:00", false), span("09:30", "10:00", true)]
    );
}

#[test]
fn test_slots_never_overlap() {
    let slots = generate(&request(
        "07:30",
        "15:00",
        40,
        &[("09:30", "09:50", "Recess"), ("12:00", "12:45", "Lunch")],
    ))
    .unwrap();

    assert!(!slots.is_empty());
    for pair in slots.windows(2) {
        assert!(pair[0].end <= pair[1].start, "{:?} overlaps {:?}", pair[0], pair[1]);
    }
}

#[test]
fn test_window_ending_near_midnight() {
    let slots = generate(&request("22:00", "23:59", 60, &[])).unwrap();
    assert_eq!(spans(&slots), vec![span("22:00", "23:00", false)]);
}

#[rstest]
#[case(request("8am", "10:00", 60, &[]))]
#[case(request("08:00", "25:00", 60, &[]))]
#[case(request("08:00", "10:60", 60, &[]))]
#[case(request("08:00", "10:00", 60, &[("09:00", "9:15", "")]))]
#[case(request("", "10:00", 60, &[]))]
fn test_malformed_times_fail_fast(#[case] input: SlotRequest) {
    let result = generate(&input);
    assert!(matches!(result, Err(SchoolError::Validation(_))));
}

#[rstest]
#[case(0)]
#[case(24 * 60 + 1)]
#[case(u32::MAX - 100)]
#[case(u32::MAX)]
fn test_out_of_range_duration_rejected(#[case] duration: u32) {
    let result = generate(&request("08:00", "10:00", duration, &[]));
    assert!(matches!(result, Err(SchoolError::Validation(_))));
}

#[test]
fn test_day_long_duration_yields_no_class() {
    let slots = generate(&request("00:00", "23:59", 24 * 60, &[])).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn test_inverted_break_rejected() {
    let result = generate(&request("08:00", "10:00", 60, &[("09:15", "09:00", "Oops")]));
    assert!(matches!(result, Err(SchoolError::Validation(_))));
}
