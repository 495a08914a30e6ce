pub mod attendance;
pub mod catalog;
pub mod schedule;
pub mod time_slot;
