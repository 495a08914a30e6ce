//! # SchoolDay Core
//!
//! Domain types and the pure scheduling logic of the SchoolDay back office:
//! the time-slot generator, the schedule placement planner and attendance
//! statistics. Nothing in this crate touches the network or the database;
//! the planner reaches its backend through the [`planner::ScheduleBackend`]
//! trait.

pub mod attendance;
pub mod errors;
pub mod models;
pub mod planner;
pub mod slots;
pub mod time;
