// Table-driven tests for the time grid and date helpers

mod date_tests;
mod timeslot_tests;
