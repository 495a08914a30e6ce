pub mod attendance;
pub mod catalog;
pub mod course;
pub mod health;
pub mod schedule;
