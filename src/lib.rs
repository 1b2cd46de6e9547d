// Spoonful planner library
// Scheduling engine, undo history and local persistence for the weekly planner

pub mod config;
pub mod models;
pub mod services;
pub mod utils;
