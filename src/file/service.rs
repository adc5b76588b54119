//! File service for Cumulus.
//!
//! High-level file operations scoped to a resolved user identity. This is
//! the layer responsible for keeping the metadata record and the on-disk
//! blob in lockstep:
//!
//! - **upload** inserts the metadata record first, letting the database's
//!   `UNIQUE(owner_id, filename)` constraint turn a racing duplicate into a
//!   `Conflict`, then writes the blob; a failed blob write deletes the
//!   just-inserted record so no orphaned record survives.
//! - **rename** updates the record first, again through the unique
//!   constraint, and only then moves the blob; a failed blob move reverts
//!   the record, so no partial rename is ever visible.
//! - **delete** removes the record first, then the blob, tolerating an
//!   already-absent blob.
//! - **download** reports a record whose blob is missing as a
//!   `Inconsistency`, distinct from an ordinary `NotFound`, because it
//!   indicates a write-path defect elsewhere.

use tracing::{error, info};

use crate::db::Database;
use crate::file::record::{FileRecord, FileRecordRepository, NewFileRecord};
use crate::file::store::{validate_filename, BlobStore};
use crate::{CumulusError, Result};

/// File store combining metadata records and blob storage.
///
/// All operations take a resolved `owner_id`, never a raw token.
pub struct FileStore {
    db: Database,
    blobs: BlobStore,
}

impl FileStore {
    /// Create a new FileStore.
    pub fn new(db: Database, blobs: BlobStore) -> Self {
        Self { db, blobs }
    }

    /// Upload a file.
    ///
    /// Fails with `InvalidInput` for an empty payload or an unsafe
    /// filename, and `Conflict` when the owner already has a file with this
    /// name. On success the record's size is the payload's byte length.
    pub async fn upload(&self, owner_id: i64, filename: &str, payload: &[u8]) -> Result<FileRecord> {
        if payload.is_empty() {
            return Err(CumulusError::InvalidInput(
                "file content is empty".to_string(),
            ));
        }
        validate_filename(filename)?;

        let repo = FileRecordRepository::new(self.db.pool());

        // Insert first: the unique constraint serializes racing uploads of
        // the same (owner, filename) into one success and one Conflict.
        let record = repo
            .insert(&NewFileRecord::new(owner_id, filename, payload.len() as i64))
            .await?;

        if let Err(e) = self.blobs.write(owner_id, filename, payload) {
            // Compensate: without the blob the record must not survive.
            if let Err(del_err) = repo.delete(record.id).await {
                error!(
                    owner_id = owner_id,
                    filename = %filename,
                    error = %del_err,
                    "Failed to remove record after blob write failure"
                );
            }
            return Err(e);
        }

        info!(
            owner_id = owner_id,
            filename = %filename,
            size = record.size,
            "File uploaded"
        );
        Ok(record)
    }

    /// List an owner's files in insertion order, optionally truncated to
    /// the first `limit` entries.
    pub async fn list(&self, owner_id: i64, limit: Option<usize>) -> Result<Vec<FileRecord>> {
        let repo = FileRecordRepository::new(self.db.pool());
        repo.list_by_owner(owner_id, limit).await
    }

    /// Find a file by exact name.
    pub async fn find_by_name(&self, owner_id: i64, filename: &str) -> Result<Option<FileRecord>> {
        let repo = FileRecordRepository::new(self.db.pool());
        repo.get_by_owner_and_name(owner_id, filename).await
    }

    /// Rename a file.
    ///
    /// Fails with `NotFound` when no record matches, `InvalidInput` for a
    /// blank or unsafe new name, and `Conflict` when the target name is
    /// taken. If the blob rename fails the metadata is reverted, so a
    /// download under the old name still succeeds.
    pub async fn rename(
        &self,
        owner_id: i64,
        filename: &str,
        new_filename: &str,
    ) -> Result<FileRecord> {
        validate_filename(new_filename)?;

        let repo = FileRecordRepository::new(self.db.pool());

        let record = repo
            .get_by_owner_and_name(owner_id, filename)
            .await?
            .ok_or_else(|| CumulusError::NotFound("file".to_string()))?;

        // Metadata first: the unique constraint is the single authority on
        // the target name, so a racing upload either loses with Conflict
        // before writing its blob or makes this update fail. The blob is
        // only moved once the record holds the new name, which keeps
        // fs::rename's replace semantics from ever clobbering another
        // record's blob.
        let updated = repo.update_filename(record.id, new_filename).await?;

        if let Err(e) = self.blobs.rename(owner_id, filename, new_filename) {
            // Revert so the record keeps pointing at the blob that exists.
            if let Err(undo_err) = repo.update_filename(record.id, filename).await {
                error!(
                    owner_id = owner_id,
                    filename = %new_filename,
                    error = %undo_err,
                    "Failed to revert record name after blob rename failure"
                );
            }
            return Err(e);
        }

        info!(
            owner_id = owner_id,
            from = %filename,
            to = %new_filename,
            "File renamed"
        );
        Ok(updated)
    }

    /// Delete a file.
    ///
    /// Fails with `NotFound` when no record matches; a second delete of the
    /// same name also reports `NotFound`. Blob removal tolerates an
    /// already-absent blob.
    pub async fn delete(&self, owner_id: i64, filename: &str) -> Result<()> {
        let repo = FileRecordRepository::new(self.db.pool());

        let record = repo
            .get_by_owner_and_name(owner_id, filename)
            .await?
            .ok_or_else(|| CumulusError::NotFound("file".to_string()))?;

        // Record first: once it is gone no reader can observe a record
        // pointing at the blob we are about to remove.
        let deleted = repo.delete(record.id).await?;
        if !deleted {
            // A racing delete already removed it.
            return Err(CumulusError::NotFound("file".to_string()));
        }

        self.blobs.remove(owner_id, filename)?;

        info!(owner_id = owner_id, filename = %filename, "File deleted");
        Ok(())
    }

    /// Download a file's content.
    ///
    /// Fails with `NotFound` when no record matches. A record whose blob is
    /// missing on disk fails with `Inconsistency` instead, logged at error
    /// level: it signals a write-path defect, not a normal miss.
    pub async fn download(&self, owner_id: i64, filename: &str) -> Result<Vec<u8>> {
        let repo = FileRecordRepository::new(self.db.pool());

        let record = repo
            .get_by_owner_and_name(owner_id, filename)
            .await?
            .ok_or_else(|| CumulusError::NotFound("file".to_string()))?;

        match self.blobs.read(owner_id, filename)? {
            Some(content) => Ok(content),
            None => {
                error!(
                    owner_id = owner_id,
                    filename = %filename,
                    record_id = record.id,
                    "Record exists but blob is missing on disk"
                );
                Err(CumulusError::Inconsistency(format!(
                    "blob for '{filename}' is missing"
                )))
            }
        }
    }

    /// Access the blob store.
    pub fn blobs(&self) -> &BlobStore {
        &self.blobs
    }
}
