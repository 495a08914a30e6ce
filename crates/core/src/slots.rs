//! # Time-slot generator
//!
//! Turns a working-day window, a class duration and a list of breaks into
//! the ordered class and break slots a timetable grid is drawn from.
//!
//! ## Algorithm
//!
//! 1. Validate every time and the duration before doing anything else.
//! 2. Sort breaks by start and merge the ones that overlap.
//! 3. Walk a cursor from the window start:
//!    - if `[cursor, cursor + duration)` intersects a break, emit one break
//!      slot for that break and jump the cursor to the break's end;
//!    - otherwise emit a class slot and advance by `duration`.
//! 4. A class slot that would run past the window end is dropped and
//!    generation stops there.
//!
//! Time between the cursor and a break that starts in the middle of a
//! class is left unscheduled. All arithmetic is done in minutes since
//! midnight, so nothing wraps past 24:00.

use chrono::NaiveTime;

use crate::errors::{SchoolError, SchoolResult};
use crate::models::time_slot::{BreakSlot, SlotRequest, TimeSlot};
use crate::time::{MINUTES_PER_DAY, format_hhmm, minutes_of_day, parse_hhmm, time_from_minutes};

const DEFAULT_BREAK_LABEL: &str = "Break";

/// Generates slots from raw form input.
///
/// # Errors
///
/// * `SchoolError::Validation` - a time is not `HH:MM`, the duration is
///   zero, or a break ends before it starts
pub fn generate(request: &SlotRequest) -> SchoolResult<Vec<TimeSlot>> {
    let start = parse_hhmm(&request.start_time)?;
    let end = parse_hhmm(&request.end_time)?;
    let breaks = request
        .break_slots
        .iter()
        .map(|raw| {
            Ok(BreakSlot {
                start: parse_hhmm(&raw.start)?,
                end: parse_hhmm(&raw.end)?,
                label: raw.label.clone(),
            })
        })
        .collect::<SchoolResult<Vec<_>>>()?;

    generate_slots(start, end, request.class_duration, &breaks)
}

/// Generates slots from already-parsed times. Returns an empty list when
/// `start >= end`.
pub fn generate_slots(
    start: NaiveTime,
    end: NaiveTime,
    class_duration: u32,
    breaks: &[BreakSlot],
) -> SchoolResult<Vec<TimeSlot>> {
    if class_duration == 0 {
        return Err(SchoolError::Validation(
            "Class duration must be greater than zero".to_string(),
        ));
    }
    if class_duration > MINUTES_PER_DAY {
        return Err(SchoolError::Validation(format!(
            "Class duration of {} minutes is longer than a day",
            class_duration
        )));
    }
    if let Some(bad) = breaks.iter().find(|b| b.start >= b.end) {
        return Err(SchoolError::Validation(format!(
            "Break {} - {} must start before it ends",
            format_hhmm(bad.start),
            format_hhmm(bad.end)
        )));
    }
    if start >= end {
        return Ok(Vec::new());
    }

    let window_start = minutes_of_day(start);
    let window_end = minutes_of_day(end);
    let breaks: Vec<MinuteBreak> = merge_breaks(breaks)
        .into_iter()
        .filter(|b| b.start < window_end && b.end > window_start)
        .collect();

    let mut slots = Vec::new();
    let mut cursor = window_start;

    while cursor < window_end {
        let Some(class_end) = cursor.checked_add(class_duration) else {
            break;
        };

        if let Some(brk) = breaks
            .iter()
            .find(|b| b.start < class_end && b.end > cursor)
        {
            let break_start = brk.start.max(cursor);
            let break_end = brk.end.min(window_end);
            slots.push(TimeSlot {
                start: to_time(break_start)?,
                end: to_time(break_end)?,
                label: brk.label.clone(),
                is_break: true,
            });
            cursor = brk.end;
            continue;
        }

        if class_end > window_end {
            break;
        }

        let slot_start = to_time(cursor)?;
        let slot_end = to_time(class_end)?;
        slots.push(TimeSlot {
            start: slot_start,
            end: slot_end,
            label: format!("{} - {}", format_hhmm(slot_start), format_hhmm(slot_end)),
            is_break: false,
        });
        cursor = class_end;
    }

    tracing::debug!(
        "Generated {} time slots between {} and {}",
        slots.len(),
        format_hhmm(start),
        format_hhmm(end)
    );

    Ok(slots)
}

#[derive(Debug, Clone)]
struct MinuteBreak {
    start: u32,
    end: u32,
    label: String,
}

/// Sorts breaks and folds overlapping ones together. A merged break keeps
/// the label of the earliest one.
fn merge_breaks(breaks: &[BreakSlot]) -> Vec<MinuteBreak> {
    let mut sorted: Vec<MinuteBreak> = breaks
        .iter()
        .map(|b| MinuteBreak {
            start: minutes_of_day(b.start),
            end: minutes_of_day(b.end),
            label: if b.label.trim().is_empty() {
                DEFAULT_BREAK_LABEL.to_string()
            } else {
                b.label.clone()
            },
        })
        .collect();
    sorted.sort_by_key(|b| (b.start, b.end));

    let mut merged: Vec<MinuteBreak> = Vec::with_capacity(sorted.len());
    for brk in sorted {
        match merged.last_mut() {
            Some(last) if brk.start < last.end => last.end = last.end.max(brk.end),
            _ => merged.push(brk),
        }
    }
    merged
}

fn to_time(minutes: u32) -> SchoolResult<NaiveTime> {
    time_from_minutes(minutes).ok_or_else(|| {
        SchoolError::Validation(format!("{} minutes is past the end of the day", minutes))
    })
}
