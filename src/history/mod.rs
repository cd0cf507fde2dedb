//! Job history store backed by SQLite
//!
//! One row per explicitly saved job; rows are append-only and deleted only
//! on user request. The parts snapshot is stored as a JSON column so a
//! whole cut list round-trips through a single row.

pub mod serialize;

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::core::predict::{JobHistory, SampleRow};
use crate::entities::job::SavedJob;
use crate::entities::part::Part;
use serialize::{decode_parts, encode_parts};

#[derive(Debug, Error)]
pub enum HistoryError {
    /// The underlying store failed; propagated unmodified, never retried here
    #[error("history storage unavailable: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A parts snapshot could not be encoded or decoded
    #[error("parts snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// One row of `history list` output
///
/// `part_count` is `None` when the stored snapshot no longer decodes; the
/// row itself is still listed so the user can inspect or delete it.
#[derive(Debug, Clone)]
pub struct JobSummary {
    pub id: i64,
    pub cabinet_type: String,
    pub base_width: f64,
    pub base_height: f64,
    pub thickness: f64,
    pub part_count: Option<usize>,
    pub created: DateTime<Utc>,
}

/// SQLite-backed history store
pub struct HistoryStore {
    conn: Connection,
}

impl HistoryStore {
    /// Open (creating if needed) the store at the given path
    pub fn open(path: &Path) -> Result<Self, HistoryError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).ok();
            }
        }
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open an in-memory store (tests)
    pub fn open_in_memory() -> Result<Self, HistoryError> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&mut self) -> Result<(), HistoryError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                id INTEGER PRIMARY KEY,
                cabinet_type TEXT NOT NULL,
                base_width REAL NOT NULL,
                base_height REAL NOT NULL,
                thickness REAL NOT NULL,
                parts TEXT NOT NULL,
                created TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_jobs_cabinet_type ON jobs(cabinet_type);
            "#,
        )?;
        Ok(())
    }

    /// Append a saved job; returns the new row id
    pub fn save(
        &self,
        cabinet_type: &str,
        base_width: f64,
        base_height: f64,
        thickness: f64,
        parts: &[Part],
        created: DateTime<Utc>,
    ) -> Result<i64, HistoryError> {
        let snapshot = encode_parts(parts)?;
        self.conn.execute(
            "INSERT INTO jobs (cabinet_type, base_width, base_height, thickness, parts, created)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                cabinet_type,
                base_width,
                base_height,
                thickness,
                snapshot,
                created.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// List saved jobs, optionally restricted to one cabinet type
    pub fn list(&self, cabinet_type: Option<&str>) -> Result<Vec<JobSummary>, HistoryError> {
        let (sql, args): (&str, Vec<&dyn rusqlite::ToSql>) = match &cabinet_type {
            Some(t) => (
                "SELECT id, cabinet_type, base_width, base_height, thickness, parts, created
                 FROM jobs WHERE cabinet_type = ?1 ORDER BY created, id",
                vec![t as &dyn rusqlite::ToSql],
            ),
            None => (
                "SELECT id, cabinet_type, base_width, base_height, thickness, parts, created
                 FROM jobs ORDER BY created, id",
                vec![],
            ),
        };

        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(&args[..], |row| {
            let parts_json: String = row.get(5)?;
            let created: String = row.get(6)?;
            Ok(JobSummary {
                id: row.get(0)?,
                cabinet_type: row.get(1)?,
                base_width: row.get(2)?,
                base_height: row.get(3)?,
                thickness: row.get(4)?,
                part_count: decode_parts(&parts_json).ok().map(|p| p.len()),
                created: parse_datetime(&created),
            })
        })?;

        let mut summaries = Vec::new();
        for row in rows {
            summaries.push(row?);
        }
        Ok(summaries)
    }

    /// Fetch one saved job with its full decoded part list
    pub fn get(&self, id: i64) -> Result<Option<SavedJob>, HistoryError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, cabinet_type, base_width, base_height, thickness, parts, created
                 FROM jobs WHERE id = ?1",
                params![id],
                |row| {
                    let parts_json: String = row.get(5)?;
                    let created: String = row.get(6)?;
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, f64>(2)?,
                        row.get::<_, f64>(3)?,
                        row.get::<_, f64>(4)?,
                        parts_json,
                        created,
                    ))
                },
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((id, cabinet_type, base_width, base_height, thickness, parts_json, created)) => {
                let parts = decode_parts(&parts_json)?;
                Ok(Some(SavedJob {
                    id,
                    cabinet_type,
                    base_width,
                    base_height,
                    thickness,
                    parts,
                    created: parse_datetime(&created),
                }))
            }
        }
    }

    /// Delete one saved job; returns whether a row existed
    pub fn delete(&self, id: i64) -> Result<bool, HistoryError> {
        let changed = self
            .conn
            .execute("DELETE FROM jobs WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Delete every saved job; returns how many were removed
    pub fn clear(&self) -> Result<usize, HistoryError> {
        let changed = self.conn.execute("DELETE FROM jobs", [])?;
        Ok(changed)
    }
}

impl JobHistory for HistoryStore {
    /// Raw sample rows for the predictor, in save order (created, then id)
    fn samples_for(&self, cabinet_type: &str) -> Result<Vec<SampleRow>, HistoryError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, base_width, base_height, parts
             FROM jobs WHERE cabinet_type = ?1 ORDER BY created, id",
        )?;
        let rows = stmt.query_map(params![cabinet_type], |row| {
            Ok(SampleRow {
                id: row.get(0)?,
                base_width: row.get(1)?,
                base_height: row.get(2)?,
                parts_json: row.get(3)?,
            })
        })?;

        let mut samples = Vec::new();
        for row in rows {
            samples.push(row?);
        }
        Ok(samples)
    }
}

/// Parse a stored RFC 3339 timestamp, tolerating pre-schema rows
fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}
