// Module exports for models

pub mod activity;
pub mod entry;
pub mod profile;
pub mod timeslot;
