// Service module exports

pub mod activity;
pub mod autosave;
pub mod database;
pub mod history;
pub mod profile;
pub mod schedule;
pub mod session;
pub mod storage;
pub mod timetable;
