// Property-based tests for the scheduling engine and undo history

mod entry_set_properties;
mod history_properties;
