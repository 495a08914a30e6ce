pub mod attendance;
pub mod catalog;
pub mod course;
pub mod schedule;
pub mod schedule_config;
