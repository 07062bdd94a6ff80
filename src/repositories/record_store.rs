// src/repositories/record_store.rs
//
// Named JSON records in the `records` table.
//
// Each record is a whole document (the current user, the movie list, the
// date poll list) and is replaced in full on every write.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};

use log::warn;

use crate::error::AppResult;

/// Current participant nickname
pub const MOVIE_USER: &str = "movie_user";
/// Movie suggestion list, newest first
pub const MOVIE_DATA_LIST: &str = "movie_data_list";
/// Date availability polls
pub const DATE_POLL_LIST: &str = "date_poll_list";

pub fn read_record(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM records WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()?;

    Ok(value)
}

pub fn write_record(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value, Utc::now().to_rfc3339()],
    )?;

    Ok(())
}

pub fn delete_record(conn: &Connection, key: &str) -> AppResult<()> {
    conn.execute("DELETE FROM records WHERE key = ?1", params![key])?;
    Ok(())
}

/// Where the raw text of an undecodable record is kept
pub fn backup_key(key: &str) -> String {
    format!("{}.corrupt", key)
}

/// Read and decode a record. A missing record is `None`.
///
/// A record that fails to decode is an error, never a silent default. Its
/// raw text is first copied to `backup_key(key)` so that the next write to
/// `key` cannot destroy it.
pub fn read_json<T: DeserializeOwned>(conn: &Connection, key: &str) -> AppResult<Option<T>> {
    let Some(raw) = read_record(conn, key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            let backup = backup_key(key);
            write_record(conn, &backup, &raw)?;
            warn!("Record {} is unreadable, raw value kept under {}", key, backup);
            Err(e.into())
        }
    }
}

pub fn write_json<T: Serialize + ?Sized>(conn: &Connection, key: &str, value: &T) -> AppResult<()> {
    let raw = serde_json::to_string(value)?;
    write_record(conn, key, &raw)
}
