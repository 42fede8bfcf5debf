//! Persistence store for Ludex
//!
//! Owns three relations: users, request history, favorites. All operations
//! are scoped by username.

mod schema;

pub use schema::*;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("User not found: {0}")]
    UserNotFound(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> DbResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    // ==================== User Operations ====================

    /// Look up a user by username
    pub fn get_user(&self, username: &str) -> DbResult<Option<User>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, username, created_at FROM users WHERE username = ?1")?;

        match stmt.query_row(params![username], parse_user_row) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(other) => Err(DbError::Sqlite(other)),
        }
    }

    /// Create a user, returning `None` when the username is already taken
    pub fn create_user(&self, username: &str) -> DbResult<Option<User>> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now();

        let inserted = conn.execute(
            "INSERT INTO users (username, created_at) VALUES (?1, ?2)",
            params![username, now.to_rfc3339()],
        );

        match inserted {
            Ok(_) => Ok(Some(User {
                id: conn.last_insert_rowid(),
                username: username.to_string(),
                created_at: now,
            })),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                tracing::warn!(username = %username, "User already exists");
                Ok(None)
            }
            Err(other) => Err(DbError::Sqlite(other)),
        }
    }

    // ==================== Search History Operations ====================

    /// Record one search query for a user
    ///
    /// Written on every search attempt regardless of whether the catalog
    /// returned results.
    pub fn record_search(&self, username: &str, title: &str) -> DbResult<HistoryEntry> {
        let conn = self.conn.lock().unwrap();
        let user_id = find_user_id(&conn, username)?;
        let now = Utc::now();

        conn.execute(
            "INSERT INTO request_history (user_id, title, timestamp) VALUES (?1, ?2, ?3)",
            params![user_id, title, now.to_rfc3339()],
        )?;

        Ok(HistoryEntry {
            id: conn.last_insert_rowid(),
            user_id,
            title: title.to_string(),
            timestamp: now,
        })
    }

    /// Recent search queries for a user, newest first
    pub fn list_history(&self, username: &str, limit: u32) -> DbResult<Vec<HistoryEntry>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT h.id, h.user_id, h.title, h.timestamp
             FROM request_history h
             JOIN users u ON u.id = h.user_id
             WHERE u.username = ?1
             ORDER BY h.timestamp DESC, h.id DESC
             LIMIT ?2",
        )?;

        let rows = stmt.query_map(params![username, limit], parse_history_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    // ==================== Favorite Operations ====================

    /// Saved titles for a user, newest first
    pub fn list_favorites(
        &self,
        username: &str,
        limit: u32,
        offset: u32,
    ) -> DbResult<Vec<Favorite>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT f.id, f.user_id, f.title, f.timestamp
             FROM favorites f
             JOIN users u ON u.id = f.user_id
             WHERE u.username = ?1
             ORDER BY f.timestamp DESC, f.id DESC
             LIMIT ?2 OFFSET ?3",
        )?;

        let rows = stmt.query_map(params![username, limit, offset], parse_favorite_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    /// Total number of saved titles for a user
    pub fn count_favorites(&self, username: &str) -> DbResult<i64> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT COUNT(*)
             FROM favorites f
             JOIN users u ON u.id = f.user_id
             WHERE u.username = ?1",
            params![username],
            |row| row.get(0),
        )
        .map_err(DbError::from)
    }

    /// Save a title for a user
    ///
    /// Idempotent: re-adding an existing title returns the existing row.
    /// The insert-or-fetch runs under one connection lock with the unique
    /// constraint as the guard, so concurrent adds cannot duplicate.
    pub fn add_favorite(&self, username: &str, title: &str) -> DbResult<Favorite> {
        let conn = self.conn.lock().unwrap();
        let user_id = find_user_id(&conn, username)?;
        let now = Utc::now();

        conn.execute(
            "INSERT INTO favorites (user_id, title, timestamp) VALUES (?1, ?2, ?3)
             ON CONFLICT (user_id, title) DO NOTHING",
            params![user_id, title, now.to_rfc3339()],
        )?;

        let mut stmt = conn.prepare(
            "SELECT id, user_id, title, timestamp
             FROM favorites WHERE user_id = ?1 AND title = ?2",
        )?;
        stmt.query_row(params![user_id, title], parse_favorite_row)
            .map_err(DbError::from)
    }

    /// Remove a saved title, returning the removed row
    ///
    /// Returns `None` when no matching favorite exists; the favorites set
    /// is left unchanged in that case.
    pub fn remove_favorite(&self, username: &str, title: &str) -> DbResult<Option<Favorite>> {
        let conn = self.conn.lock().unwrap();
        let user_id = find_user_id(&conn, username)?;

        let mut stmt = conn.prepare(
            "SELECT id, user_id, title, timestamp
             FROM favorites WHERE user_id = ?1 AND title = ?2",
        )?;
        let existing = match stmt.query_row(params![user_id, title], parse_favorite_row) {
            Ok(favorite) => favorite,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(other) => return Err(DbError::Sqlite(other)),
        };

        conn.execute("DELETE FROM favorites WHERE id = ?1", params![existing.id])?;
        Ok(Some(existing))
    }
}

/// Resolve a username to its row id, or `UserNotFound`
fn find_user_id(conn: &Connection, username: &str) -> DbResult<i64> {
    conn.query_row(
        "SELECT id FROM users WHERE username = ?1",
        params![username],
        |row| row.get(0),
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => DbError::UserNotFound(username.to_string()),
        other => DbError::Sqlite(other),
    })
}

fn parse_user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        created_at: parse_datetime(&row.get::<_, String>(2)?),
    })
}

fn parse_history_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<HistoryEntry> {
    Ok(HistoryEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        timestamp: parse_datetime(&row.get::<_, String>(3)?),
    })
}

fn parse_favorite_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Favorite> {
    Ok(Favorite {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        timestamp: parse_datetime(&row.get::<_, String>(3)?),
    })
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}
