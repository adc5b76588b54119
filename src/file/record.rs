//! File metadata records and repository for Cumulus.
//!
//! A `FileRecord` describes one stored file owned by one user. The pair
//! (owner_id, filename) is unique; the `UNIQUE` constraint in the database
//! is what turns a concurrent duplicate insert into a `Conflict` instead of
//! silently duplicated state.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::db::repository::is_unique_violation;
use crate::{CumulusError, Result};

/// Metadata for one stored file.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FileRecord {
    /// Unique record ID.
    pub id: i64,
    /// User ID of the owner.
    pub owner_id: i64,
    /// Filename, unique within the owner's namespace.
    pub filename: String,
    /// File size in bytes, set once at upload from the payload length.
    pub size: i64,
    /// When the file was uploaded.
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new file record.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    /// User ID of the owner.
    pub owner_id: i64,
    /// Filename.
    pub filename: String,
    /// File size in bytes.
    pub size: i64,
}

impl NewFileRecord {
    /// Create a new NewFileRecord.
    pub fn new(owner_id: i64, filename: impl Into<String>, size: i64) -> Self {
        Self {
            owner_id,
            filename: filename.into(),
            size,
        }
    }
}

/// Repository for file metadata operations, keyed by (owner, filename).
pub struct FileRecordRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FileRecordRepository<'a> {
    /// Create a new FileRecordRepository with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new file record.
    ///
    /// A duplicate (owner, filename) pair fails with `Conflict`; the unique
    /// constraint makes this hold even when two inserts race.
    pub async fn insert(&self, record: &NewFileRecord) -> Result<FileRecord> {
        let result =
            sqlx::query("INSERT INTO files (owner_id, filename, size, created_at) VALUES (?, ?, ?, ?)")
                .bind(record.owner_id)
                .bind(&record.filename)
                .bind(record.size)
                .bind(Utc::now())
                .execute(self.pool)
                .await;

        let result = match result {
            Ok(r) => r,
            Err(e) if is_unique_violation(&e) => {
                return Err(CumulusError::Conflict(format!(
                    "file '{}' already exists",
                    record.filename
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| CumulusError::NotFound("file".to_string()))
    }

    /// Get a record by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<FileRecord>> {
        let record = sqlx::query_as::<_, FileRecord>(
            "SELECT id, owner_id, filename, size, created_at FROM files WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }

    /// Get a record by owner and exact filename.
    pub async fn get_by_owner_and_name(
        &self,
        owner_id: i64,
        filename: &str,
    ) -> Result<Option<FileRecord>> {
        let record = sqlx::query_as::<_, FileRecord>(
            "SELECT id, owner_id, filename, size, created_at
             FROM files WHERE owner_id = ? AND filename = ?",
        )
        .bind(owner_id)
        .bind(filename)
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }

    /// List an owner's records in insertion order, optionally truncated to
    /// the first `limit` entries.
    pub async fn list_by_owner(
        &self,
        owner_id: i64,
        limit: Option<usize>,
    ) -> Result<Vec<FileRecord>> {
        let records = match limit {
            Some(limit) => {
                sqlx::query_as::<_, FileRecord>(
                    "SELECT id, owner_id, filename, size, created_at
                     FROM files WHERE owner_id = ? ORDER BY id ASC LIMIT ?",
                )
                .bind(owner_id)
                .bind(limit as i64)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, FileRecord>(
                    "SELECT id, owner_id, filename, size, created_at
                     FROM files WHERE owner_id = ? ORDER BY id ASC",
                )
                .bind(owner_id)
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(records)
    }

    /// Update a record's filename. Only the filename field is ever mutated.
    ///
    /// Fails with `Conflict` when the target name is taken, keeping the
    /// record unchanged.
    pub async fn update_filename(&self, id: i64, new_filename: &str) -> Result<FileRecord> {
        let result = sqlx::query("UPDATE files SET filename = ? WHERE id = ?")
            .bind(new_filename)
            .bind(id)
            .execute(self.pool)
            .await;

        match result {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(CumulusError::Conflict(format!(
                    "file '{new_filename}' already exists"
                )));
            }
            Err(e) => return Err(e.into()),
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| CumulusError::NotFound("file".to_string()))
    }

    /// Delete a record by ID.
    ///
    /// Returns `true` if a record was deleted, `false` if it was already
    /// gone (e.g. a racing delete won).
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
