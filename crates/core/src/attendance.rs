//! Attendance status display descriptors and per-section statistics.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::attendance::{AttendanceRecord, AttendanceStatus};

const NEGATIVE_COLOR: &str = "#dc2626";
const EXCUSED_COLOR: &str = "#d97706";
const NEUTRAL_COLOR: &str = "#16a34a";
const DEFAULT_ICON: &str = "circle";

/// How one attendance status is shown: badge color, icon, label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDisplay {
    pub code: String,
    pub label: String,
    pub color: String,
    pub icon: String,
    pub is_negative: bool,
    pub is_excused: bool,
}

impl From<&AttendanceStatus> for StatusDisplay {
    fn from(status: &AttendanceStatus) -> Self {
        let fallback_color = match (status.is_negative, status.is_excused) {
            (true, false) => NEGATIVE_COLOR,
            (_, true) => EXCUSED_COLOR,
            (false, false) => NEUTRAL_COLOR,
        };

        Self {
            code: status.code.clone(),
            label: status.name.clone(),
            color: status
                .color
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| fallback_color.to_string()),
            icon: status
                .icon
                .clone()
                .filter(|i| !i.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ICON.to_string()),
            is_negative: status.is_negative,
            is_excused: status.is_excused,
        }
    }
}

/// Display descriptors for every configured status, built once per fetch.
#[derive(Debug, Clone, Default)]
pub struct StatusPalette {
    ordered: Vec<StatusDisplay>,
    by_code: HashMap<String, usize>,
}

impl StatusPalette {
    pub fn from_statuses(statuses: &[AttendanceStatus]) -> Self {
        let mut palette = Self::default();
        for status in statuses {
            if palette.by_code.contains_key(&status.code) {
                continue;
            }
            palette
                .by_code
                .insert(status.code.clone(), palette.ordered.len());
            palette.ordered.push(StatusDisplay::from(status));
        }
        palette
    }

    pub fn get(&self, code: &str) -> Option<&StatusDisplay> {
        self.by_code.get(code).map(|&i| &self.ordered[i])
    }

    pub fn displays(&self) -> &[StatusDisplay] {
        &self.ordered
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceStats {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub excused: usize,
    pub unknown: usize,
    pub per_status: BTreeMap<String, usize>,
    pub attendance_rate: f64,
}

impl AttendanceStats {
    /// Tallies `records` in one pass. Codes missing from `palette` are
    /// counted as `unknown` and never as present.
    pub fn compute(records: &[AttendanceRecord], palette: &StatusPalette) -> Self {
        let mut stats = Self::default();

        for record in records {
            stats.total += 1;
            *stats
                .per_status
                .entry(record.status_code.clone())
                .or_insert(0) += 1;

            match palette.get(&record.status_code) {
                Some(display) if !display.is_negative => stats.present += 1,
                Some(display) if display.is_excused => stats.excused += 1,
                Some(_) => stats.absent += 1,
                None => stats.unknown += 1,
            }
        }

        stats.attendance_rate = if stats.total == 0 {
            0.0
        } else {
            stats.present as f64 / stats.total as f64
        };
        stats
    }
}
