//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! The engine calls store methods — it never executes SQL directly.
//!
//! The board persists as a plain key-value table: each key holds one
//! JSON-encoded structure, and every write overwrites the prior value in
//! full. Reads return `None` for keys that were never written; decoding
//! (and tolerance of malformed values) happens in snapshot.rs.

use crate::error::BoardResult;
use rusqlite::{params, Connection, OptionalExtension};

pub struct BoardStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl BoardStore {
    pub fn open(path: &str) -> BoardResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> BoardResult<Self> {
        let conn = Connection::open(":memory:")?;
        Ok(Self { conn, path: None })
    }

    /// Reopen a new connection to the same database.
    /// For in-memory databases, this returns a new in-memory database
    /// (isolated). For file-based databases, this opens the same file —
    /// shared-cache URIs behave like files as long as one connection stays
    /// open.
    pub fn reopen(&self) -> BoardResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> BoardResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_board_kv.sql"))?;
        Ok(())
    }

    // ── Key-value contract ─────────────────────────────────────

    /// Overwrite the value stored under `key`.
    pub fn put(&self, key: &str, value: &str) -> BoardResult<()> {
        self.conn.execute(
            "INSERT INTO board_kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Read the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> BoardResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM board_kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}
