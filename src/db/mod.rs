use crate::errors::{AppError, AppResult};
use crate::models::{DiaryEntry, Mood, ReminderSettings};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

const SCHEMA_SQL: &str = include_str!("schema.sql");

const ENTRY_COLUMNS: &str = "id, content, mood, color_hex, date, created_at, updated_at";

/// Durable entry store. One connection behind a mutex; every mutating call
/// commits before it returns.
#[derive(Debug)]
pub struct Database {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl Database {
    pub fn new(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| AppError::Io(err.to_string()))?;
        }
        let conn = Connection::open(path).map_err(AppError::from)?;
        conn.execute_batch(SCHEMA_SQL).map_err(AppError::from)?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Inserts a new entry with a fresh id and `created_at == updated_at`.
    /// Content validation is the editor's job; the store takes what it gets.
    pub fn create_entry(
        &self,
        content: &str,
        mood: Mood,
        color_hex: &str,
        date: DateTime<Utc>,
    ) -> AppResult<DiaryEntry> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let conn = self.conn.lock().map_err(|_| AppError::Internal("database mutex poisoned".to_string()))?;
        conn.execute(
            "INSERT INTO entries (id, content, mood, color_hex, date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                id,
                content,
                mood.as_str(),
                color_hex,
                date.to_rfc3339(),
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )?;

        Ok(DiaryEntry {
            id,
            content: content.to_string(),
            mood,
            color_hex: color_hex.to_string(),
            date,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rewrites content, mood, and color; `date` and `created_at` stay put,
    /// `updated_at` advances.
    pub fn update_entry(
        &self,
        entry_id: &str,
        content: &str,
        mood: Mood,
        color_hex: &str,
    ) -> AppResult<DiaryEntry> {
        let now = Utc::now().to_rfc3339();
        let conn = self.conn.lock().map_err(|_| AppError::Internal("database mutex poisoned".to_string()))?;
        let changed = conn.execute(
            "UPDATE entries SET content = ?1, mood = ?2, color_hex = ?3, updated_at = ?4 WHERE id = ?5",
            params![content, mood.as_str(), color_hex, now, entry_id],
        )?;
        if changed == 0 {
            return Err(AppError::NotFound(format!("entry '{}'", entry_id)));
        }
        drop(conn);
        self.get_entry(entry_id)?
            .ok_or_else(|| AppError::NotFound(format!("entry '{}'", entry_id)))
    }

    pub fn delete_entry(&self, entry_id: &str) -> AppResult<()> {
        let conn = self.conn.lock().map_err(|_| AppError::Internal("database mutex poisoned".to_string()))?;
        let changed = conn.execute("DELETE FROM entries WHERE id = ?1", [entry_id])?;
        if changed == 0 {
            return Err(AppError::NotFound(format!("entry '{}'", entry_id)));
        }
        Ok(())
    }

    /// Bulk delete for the home list. Ids that are already gone are skipped;
    /// returns how many rows actually went away.
    pub fn delete_entries(&self, entry_ids: &[String]) -> AppResult<usize> {
        let conn = self.conn.lock().map_err(|_| AppError::Internal("database mutex poisoned".to_string()))?;
        let mut removed = 0;
        for entry_id in entry_ids {
            removed += conn.execute("DELETE FROM entries WHERE id = ?1", [entry_id])?;
        }
        Ok(removed)
    }

    pub fn get_entry(&self, entry_id: &str) -> AppResult<Option<DiaryEntry>> {
        let conn = self.conn.lock().map_err(|_| AppError::Internal("database mutex poisoned".to_string()))?;
        conn.query_row(
            &format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE id = ?1"),
            [entry_id],
            parse_entry_row,
        )
        .optional()
        .map_err(AppError::from)
    }

    /// All entries, diary date descending. Same-date ties come back in
    /// insertion order; nothing user-visible hangs on that.
    pub fn fetch_all(&self) -> AppResult<Vec<DiaryEntry>> {
        let conn = self.conn.lock().map_err(|_| AppError::Internal("database mutex poisoned".to_string()))?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS} FROM entries ORDER BY date DESC, rowid ASC"
        ))?;
        let entries = stmt
            .query_map([], parse_entry_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Entries with `start <= date <= end`, both ends inclusive. An inverted
    /// range matches nothing.
    pub fn fetch_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<DiaryEntry>> {
        let conn = self.conn.lock().map_err(|_| AppError::Internal("database mutex poisoned".to_string()))?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS} FROM entries
             WHERE date >= ?1 AND date <= ?2
             ORDER BY date DESC, rowid ASC"
        ))?;
        let entries = stmt
            .query_map(params![start.to_rfc3339(), end.to_rfc3339()], parse_entry_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Case-insensitive substring match on content (SQLite LIKE semantics).
    /// Empty-string policy lives in the caller, not here.
    pub fn search_by_text(&self, text: &str) -> AppResult<Vec<DiaryEntry>> {
        let conn = self.conn.lock().map_err(|_| AppError::Internal("database mutex poisoned".to_string()))?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS} FROM entries
             WHERE content LIKE ?1
             ORDER BY date DESC, rowid ASC"
        ))?;
        let entries = stmt
            .query_map([format!("%{}%", text)], parse_entry_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn get_reminder_settings(&self) -> AppResult<ReminderSettings> {
        let conn = self.conn.lock().map_err(|_| AppError::Internal("database mutex poisoned".to_string()))?;
        let raw = conn
            .query_row(
                "SELECT value_json FROM settings WHERE key = 'reminder'",
                [],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        match raw {
            Some(raw) => Ok(serde_json::from_str::<ReminderSettings>(&raw).unwrap_or_default()),
            None => Ok(ReminderSettings::default()),
        }
    }

    /// Partial update: unknown fields in `update` are merged over the stored
    /// settings, so callers can flip `enabled` without resending the time.
    pub fn update_reminder_settings(&self, update: serde_json::Value) -> AppResult<ReminderSettings> {
        let current = self.get_reminder_settings()?;
        let mut merged = serde_json::to_value(current)?;
        merge_json(&mut merged, update);
        let settings: ReminderSettings = serde_json::from_value(merged)?;

        let conn = self.conn.lock().map_err(|_| AppError::Internal("database mutex poisoned".to_string()))?;
        conn.execute(
            "INSERT INTO settings (key, value_json, updated_at)
             VALUES ('reminder', ?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value_json = excluded.value_json, updated_at = excluded.updated_at",
            params![serde_json::to_string(&settings)?, Utc::now().to_rfc3339()],
        )?;

        Ok(settings)
    }
}

fn parse_entry_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DiaryEntry> {
    Ok(DiaryEntry {
        id: row.get(0)?,
        content: row.get(1)?,
        mood: Mood::parse_lenient(&row.get::<_, String>(2)?),
        color_hex: row.get(3)?,
        date: parse_time(&row.get::<_, String>(4)?)?,
        created_at: parse_time(&row.get::<_, String>(5)?)?,
        updated_at: parse_time(&row.get::<_, String>(6)?)?,
    })
}

fn parse_time(raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, error.to_string())),
            )
        })
}

fn merge_json(target: &mut serde_json::Value, update: serde_json::Value) {
    match (target, update) {
        (serde_json::Value::Object(target_map), serde_json::Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_json(target_map.entry(key).or_insert(serde_json::Value::Null), value);
            }
        }
        (target, update) => {
            *target = update;
        }
    }
}
