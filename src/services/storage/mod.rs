//! Device-local key/value storage.
//!
//! Undo history is kept on the device rather than with the timetable data.
//! Anything implementing [`KeyValueStore`] can back it: the SQLite table in
//! the local database for real use, [`MemoryStore`] for tests.

use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

/// String-keyed text storage.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

/// In-process store, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

/// Key/value rows in the `local_history` table.
pub struct LocalStore<'a> {
    conn: &'a Connection,
}

impl<'a> LocalStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl<'a> KeyValueStore for LocalStore<'a> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM local_history WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read local value '{}'", key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO local_history (key, value, updated_at)
                 VALUES (?1, ?2, CURRENT_TIMESTAMP)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = CURRENT_TIMESTAMP",
                params![key, value],
            )
            .with_context(|| format!("Failed to write local value '{}'", key))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM local_history WHERE key = ?1", params![key])
            .with_context(|| format!("Failed to delete local value '{}'", key))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::database::Database;

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap(), Some("2".to_string()));
        assert_eq!(store.len(), 1);

        store.delete("a").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_local_store_upserts() {
        let db = setup_test_db();
        let store = LocalStore::new(db.connection());

        store.set("history_2025-01-06", "{}").unwrap();
        store.set("history_2025-01-06", "{\"x\":1}").unwrap();
        assert_eq!(
            store.get("history_2025-01-06").unwrap(),
            Some("{\"x\":1}".to_string())
        );
        assert_eq!(store.get("history_2025-01-13").unwrap(), None);
    }

    #[test]
    fn test_local_store_delete_missing_key_is_ok() {
        let db = setup_test_db();
        let store = LocalStore::new(db.connection());
        assert!(store.delete("nothing-here").is_ok());
    }

    #[test]
    fn test_reference_forwards_to_store() {
        let store = MemoryStore::new();
        let by_ref: &MemoryStore = &store;
        KeyValueStore::set(&by_ref, "k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
    }
}
