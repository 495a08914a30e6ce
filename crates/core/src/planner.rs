//! # Schedule Planner
//!
//! Client-side bookkeeping for the drag-and-drop timetable editor.
//!
//! A [`SchedulePlanner`] holds, for one section, the schedules last fetched
//! from the backend plus two collections of unsaved edits:
//!
//! - **temp schedules**: placements that only exist locally, identified by
//!   a `"temp-N"` id;
//! - **pending changes**: an ordered log of `create`/`update`/`delete`
//!   records with at most one record per schedule id. A later edit to the
//!   same id replaces the earlier record in place.
//!
//! The grid a user sees is [`SchedulePlanner::schedules`]: server schedules
//! with deleted ids removed and updated ids replaced, plus the temp
//! schedules. [`SchedulePlanner::save`] flushes the log through a
//! [`ScheduleBackend`] and then reloads the server schedules.
//!
//! A single cell moves through `Empty -> PartiallyFilled -> Filled` as a
//! course and a teacher are dropped on it. Dropping a role onto a cell that
//! already has one replaces it. Moving a schedule onto a cell held by a
//! different schedule is refused with `SchoolError::Conflict`.

use async_trait::async_trait;
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{SchoolError, SchoolResult};
use crate::models::schedule::{
    BatchSaveResponse, ChangeAction, MutationResponse, NewSchedule, Schedule, ScheduleChange,
    ScheduleId,
};
use crate::models::time_slot::{ScheduleConfig, TimeSlot};
use crate::time::{format_hhmm, iso_weekday};

/// Something dragged onto the timetable grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DragItem {
    Course { id: Uuid, name: String },
    Teacher { id: Uuid, name: String },
    Schedule { id: ScheduleId },
}

/// The operations a planner needs from whatever persists schedules.
#[async_trait]
pub trait ScheduleBackend: Send + Sync {
    /// Whether [`ScheduleBackend::batch_save`] is available. When it is
    /// not, changes are replayed one call at a time.
    fn supports_batch(&self) -> bool {
        false
    }

    async fn create_schedule(&self, data: NewSchedule) -> SchoolResult<MutationResponse>;

    async fn update_schedule(&self, id: Uuid, data: NewSchedule) -> SchoolResult<MutationResponse>;

    async fn delete_schedule(&self, id: Uuid) -> SchoolResult<()>;

    async fn batch_save(&self, changes: &[ScheduleChange]) -> SchoolResult<BatchSaveResponse> {
        let _ = changes;
        Err(SchoolError::Rejected(
            "Batch save is not supported by this backend".to_string(),
        ))
    }

    async fn list_schedules(&self, section_id: Uuid) -> SchoolResult<Vec<Schedule>>;
}

#[derive(Debug, Clone)]
pub struct SchedulePlanner {
    section_id: Uuid,
    server_schedules: Vec<Schedule>,
    temp_schedules: Vec<Schedule>,
    pending_changes: Vec<ScheduleChange>,
    next_temp_id: u64,
}

impl SchedulePlanner {
    pub fn new(section_id: Uuid, server_schedules: Vec<Schedule>) -> Self {
        let mut planner = Self {
            section_id,
            server_schedules: Vec::new(),
            temp_schedules: Vec::new(),
            pending_changes: Vec::new(),
            next_temp_id: 1,
        };
        planner.replace_server_schedules(server_schedules);
        planner
    }

    pub fn section_id(&self) -> Uuid {
        self.section_id
    }

    pub fn server_schedules(&self) -> &[Schedule] {
        &self.server_schedules
    }

    pub fn temp_schedules(&self) -> &[Schedule] {
        &self.temp_schedules
    }

    pub fn pending_changes(&self) -> &[ScheduleChange] {
        &self.pending_changes
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.pending_changes.is_empty()
    }

    /// Swaps in a fresh copy of the backend's schedules. Rows belonging to
    /// other sections are ignored.
    pub fn replace_server_schedules(&mut self, schedules: Vec<Schedule>) {
        let section_id = self.section_id;
        self.server_schedules = schedules
            .into_iter()
            .filter(|s| s.section_id == section_id)
            .collect();
    }

    /// The schedules to render, with pending edits applied.
    pub fn schedules(&self) -> Vec<Schedule> {
        let mut view: Vec<Schedule> = self
            .server_schedules
            .iter()
            .filter_map(|schedule| match self.change_for(&schedule.id) {
                Some(change) if change.action == ChangeAction::Delete => None,
                Some(change) if change.action == ChangeAction::Update => {
                    Some(change.schedule.clone())
                }
                _ => Some(schedule.clone()),
            })
            .collect();

        view.extend(
            self.temp_schedules
                .iter()
                .filter(|s| s.section_id == self.section_id)
                .cloned(),
        );
        view
    }

    /// The schedule rendered in the `(day, start)` cell, if any.
    pub fn occupant(&self, day: Weekday, start: NaiveTime) -> Option<Schedule> {
        self.schedules()
            .into_iter()
            .find(|s| s.occupies(day, start))
    }

    pub fn drop_item(&mut self, item: DragItem, day: Weekday, slot: &TimeSlot) -> SchoolResult<()> {
        if slot.is_break {
            return Err(SchoolError::Validation(format!(
                "Cannot place anything on break '{}'",
                slot.label
            )));
        }

        match item {
            DragItem::Course { id, name } => self.assign(day, slot, |schedule| {
                schedule.course_id = Some(id);
                schedule.course_name = Some(name.clone());
            }),
            DragItem::Teacher { id, name } => self.assign(day, slot, |schedule| {
                schedule.teacher_id = Some(id);
                schedule.teacher_name = Some(name.clone());
            }),
            DragItem::Schedule { id } => self.relocate(&id, day, slot),
        }
    }

    pub fn delete(&mut self, id: &ScheduleId) -> SchoolResult<()> {
        match id {
            ScheduleId::Temp(_) => {
                let before = self.temp_schedules.len();
                self.temp_schedules.retain(|s| &s.id != id);
                if self.temp_schedules.len() == before {
                    return Err(SchoolError::NotFound(format!(
                        "Temporary schedule {} not found",
                        id
                    )));
                }
                self.pending_changes.retain(|c| &c.schedule.id != id);
            }
            ScheduleId::Saved(_) => {
                let original = self.server_schedule(id)?.clone();
                self.upsert_change(ChangeAction::Delete, original.clone(), Some(original));
            }
        }

        debug!("Schedule {} marked for deletion", id);
        Ok(())
    }

    /// Drops every unsaved edit.
    pub fn discard(&mut self) {
        self.temp_schedules.clear();
        self.pending_changes.clear();
    }

    /// Flushes pending changes to `backend`, then reloads the server
    /// schedules.
    ///
    /// Uses [`ScheduleBackend::batch_save`] when the backend supports it,
    /// otherwise replays the log in order. If any call fails the planner is
    /// left exactly as it was; changes the backend already accepted are not
    /// rolled back.
    pub async fn save<B>(&mut self, backend: &B) -> SchoolResult<()>
    where
        B: ScheduleBackend + ?Sized,
    {
        if self.pending_changes.is_empty() {
            debug!("No pending schedule changes to save");
            return Ok(());
        }

        if let Err(err) = self.flush(backend).await {
            warn!("Saving schedule changes failed: {}", err);
            return Err(err);
        }

        info!(
            "Saved {} schedule changes for section {}",
            self.pending_changes.len(),
            self.section_id
        );
        self.discard();
        self.refresh(backend).await
    }

    pub async fn refresh<B>(&mut self, backend: &B) -> SchoolResult<()>
    where
        B: ScheduleBackend + ?Sized,
    {
        let schedules = backend.list_schedules(self.section_id).await?;
        self.replace_server_schedules(schedules);
        Ok(())
    }

    async fn flush<B>(&self, backend: &B) -> SchoolResult<()>
    where
        B: ScheduleBackend + ?Sized,
    {
        if backend.supports_batch() {
            let response = backend.batch_save(&self.pending_changes).await?;
            if !response.success {
                return Err(SchoolError::Rejected(
                    response
                        .message
                        .unwrap_or_else(|| "Batch save failed".to_string()),
                ));
            }
            return Ok(());
        }

        for change in &self.pending_changes {
            match change.action {
                ChangeAction::Create => {
                    let response = backend
                        .create_schedule(change.schedule.to_new_schedule())
                        .await?;
                    ensure_success(response, "Failed to create schedule")?;
                }
                ChangeAction::Update => {
                    let id = saved_id(change)?;
                    let response = backend
                        .update_schedule(id, change.schedule.to_new_schedule())
                        .await?;
                    ensure_success(response, "Failed to update schedule")?;
                }
                ChangeAction::Delete => {
                    backend.delete_schedule(saved_id(change)?).await?;
                }
            }
        }
        Ok(())
    }

    fn assign<F>(&mut self, day: Weekday, slot: &TimeSlot, apply: F) -> SchoolResult<()>
    where
        F: Fn(&mut Schedule),
    {
        match self.occupant(day, slot.start) {
            Some(mut occupant) => {
                apply(&mut occupant);
                self.store(occupant)
            }
            None => {
                let mut schedule = Schedule {
                    id: self.allocate_temp_id(),
                    section_id: self.section_id,
                    day_of_week: day,
                    start_time: slot.start,
                    end_time: slot.end,
                    course_id: None,
                    teacher_id: None,
                    course_name: None,
                    teacher_name: None,
                };
                apply(&mut schedule);
                debug!(
                    "Created temporary schedule {} on {} at {}",
                    schedule.id,
                    day,
                    format_hhmm(slot.start)
                );
                self.temp_schedules.push(schedule.clone());
                self.pending_changes.push(ScheduleChange {
                    action: ChangeAction::Create,
                    schedule,
                    original_schedule: None,
                });
                Ok(())
            }
        }
    }

    fn relocate(&mut self, id: &ScheduleId, day: Weekday, slot: &TimeSlot) -> SchoolResult<()> {
        let mut moved = self
            .schedules()
            .into_iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| SchoolError::NotFound(format!("Schedule {} not found", id)))?;

        if let Some(other) = self.occupant(day, slot.start) {
            if &other.id != id {
                return Err(SchoolError::Conflict(format!(
                    "{} at {} is already taken by schedule {}",
                    day,
                    format_hhmm(slot.start),
                    other.id
                )));
            }
        }

        moved.day_of_week = day;
        moved.start_time = slot.start;
        moved.end_time = slot.end;
        self.store(moved)
    }

    /// Writes an edited schedule back: temp schedules are replaced in place
    /// along with their `create` record, saved ones get an `update` record.
    fn store(&mut self, schedule: Schedule) -> SchoolResult<()> {
        if schedule.is_temp() {
            if let Some(existing) = self.temp_schedules.iter_mut().find(|s| s.id == schedule.id) {
                *existing = schedule.clone();
            }
            self.upsert_change(ChangeAction::Create, schedule, None);
        } else {
            let original = self.server_schedule(&schedule.id)?.clone();
            self.upsert_change(ChangeAction::Update, schedule, Some(original));
        }
        Ok(())
    }

    fn upsert_change(
        &mut self,
        action: ChangeAction,
        schedule: Schedule,
        original_schedule: Option<Schedule>,
    ) {
        let change = ScheduleChange {
            action,
            schedule,
            original_schedule,
        };

        match self
            .pending_changes
            .iter_mut()
            .find(|c| c.schedule.id == change.schedule.id)
        {
            Some(existing) => *existing = change,
            None => self.pending_changes.push(change),
        }
    }

    fn change_for(&self, id: &ScheduleId) -> Option<&ScheduleChange> {
        self.pending_changes.iter().find(|c| &c.schedule.id == id)
    }

    fn server_schedule(&self, id: &ScheduleId) -> SchoolResult<&Schedule> {
        self.server_schedules
            .iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| SchoolError::NotFound(format!("Schedule {} not found", id)))
    }

    fn allocate_temp_id(&mut self) -> ScheduleId {
        let id = ScheduleId::Temp(format!("temp-{}", self.next_temp_id));
        self.next_temp_id += 1;
        id
    }
}

fn ensure_success(response: MutationResponse, fallback: &str) -> SchoolResult<()> {
    if response.success {
        Ok(())
    } else {
        Err(SchoolError::Rejected(
            response
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string()),
        ))
    }
}

fn saved_id(change: &ScheduleChange) -> SchoolResult<Uuid> {
    change.schedule.id.saved().ok_or_else(|| {
        SchoolError::Validation(format!(
            "Cannot {:?} unsaved schedule {}",
            change.action, change.schedule.id
        ))
    })
}

/// How much of a cell is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    Empty,
    PartiallyFilled,
    Filled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    #[serde(with = "iso_weekday")]
    pub day: Weekday,
    pub schedule: Option<Schedule>,
}

impl GridCell {
    pub fn state(&self) -> CellState {
        match &self.schedule {
            None => CellState::Empty,
            Some(s) if s.is_filled() => CellState::Filled,
            Some(_) => CellState::PartiallyFilled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    pub slot: TimeSlot,
    pub cells: Vec<GridCell>,
}

/// Lays `schedules` out on the section's timetable: one row per generated
/// slot, one cell per working day. Break rows are always empty.
pub fn build_grid(config: &ScheduleConfig, schedules: &[Schedule]) -> SchoolResult<Vec<GridRow>> {
    let slots = config.time_slots()?;

    Ok(slots
        .into_iter()
        .map(|slot| {
            let cells = config
                .working_days
                .iter()
                .map(|&day| GridCell {
                    day,
                    schedule: if slot.is_break {
                        None
                    } else {
                        schedules
                            .iter()
                            .find(|s| s.occupies(day, slot.start))
                            .cloned()
                    },
                })
                .collect();
            GridRow { slot, cells }
        })
        .collect())
}
