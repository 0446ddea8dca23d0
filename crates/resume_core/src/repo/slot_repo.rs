//! Durable key-value slot contracts and implementations.
//!
//! # Responsibility
//! - Provide read/overwrite/remove over named text slots.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `write_slot` replaces any previous value for the key.
//! - `remove_slot` on a missing key succeeds.

use crate::repo::RepoResult;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Repository interface for named text slots.
pub trait SlotRepository {
    /// Returns the slot value, or `None` when the slot was never written.
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>>;
    /// Overwrites the slot value.
    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()>;
    /// Deletes the slot entirely.
    fn remove_slot(&self, key: &str) -> RepoResult<()>;
}

/// SQLite-backed slot repository over a migrated connection.
pub struct SqliteSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SlotRepository for SqliteSlotRepository<'_> {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> RepoResult<()> {
        self.conn.execute("DELETE FROM slots WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// Process-local slot repository for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemorySlotRepository {
    slots: RefCell<BTreeMap<String, String>>,
}

impl MemorySlotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository with one pre-populated slot.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let repo = Self::new();
        repo.slots.borrow_mut().insert(key.into(), value.into());
        repo
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.borrow().contains_key(key)
    }
}

impl SlotRepository for MemorySlotRepository {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> RepoResult<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySlotRepository, SlotRepository};

    #[test]
    fn memory_slot_overwrites_and_removes() {
        let repo = MemorySlotRepository::new();
        assert_eq!(repo.read_slot("k").unwrap(), None);

        repo.write_slot("k", "one").unwrap();
        repo.write_slot("k", "two").unwrap();
        assert_eq!(repo.read_slot("k").unwrap().as_deref(), Some("two"));

        repo.remove_slot("k").unwrap();
        repo.remove_slot("k").unwrap();
        assert!(!repo.contains("k"));
    }
}
