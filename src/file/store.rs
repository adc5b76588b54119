//! Blob storage for Cumulus.
//!
//! Blobs are raw bytes stored on the filesystem under a per-user directory:
//!
//! ```text
//! {base_path}/
//! ├── 1/
//! │   ├── a.txt
//! │   └── photo.png
//! ├── 2/
//! │   └── a.txt
//! └── ...
//! ```
//!
//! Filenames are validated as single path segments before any disk
//! operation, so a path built for one user's operation can never resolve
//! outside that user's subdirectory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{CumulusError, Result};

/// Validate that a filename is a safe, single path segment.
///
/// Rejects empty or blank names, path separators, `.`/`..`, and NUL bytes.
pub fn validate_filename(filename: &str) -> Result<()> {
    if filename.trim().is_empty() {
        return Err(CumulusError::InvalidInput(
            "filename must not be blank".to_string(),
        ));
    }
    if filename.contains('/') || filename.contains('\\') || filename.contains('\0') {
        return Err(CumulusError::InvalidInput(format!(
            "filename '{filename}' contains forbidden characters"
        )));
    }
    if filename == "." || filename == ".." {
        return Err(CumulusError::InvalidInput(format!(
            "filename '{filename}' is not allowed"
        )));
    }
    Ok(())
}

/// Filesystem blob store with per-user namespaces.
#[derive(Debug, Clone)]
pub struct BlobStore {
    /// Root directory for all user namespaces.
    base_path: PathBuf,
}

impl BlobStore {
    /// Create a new BlobStore rooted at the given path.
    ///
    /// The root directory is created if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Get the root path of this store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the full path of a blob, validating the filename first.
    pub fn blob_path(&self, owner_id: i64, filename: &str) -> Result<PathBuf> {
        validate_filename(filename)?;
        Ok(self.user_dir(owner_id).join(filename))
    }

    /// Write a blob, creating the owner's directory if needed.
    pub fn write(&self, owner_id: i64, filename: &str, content: &[u8]) -> Result<()> {
        let path = self.blob_path(owner_id, filename)?;

        fs::create_dir_all(self.user_dir(owner_id))
            .map_err(|e| CumulusError::Storage(format!("creating user directory: {e}")))?;
        fs::write(&path, content)
            .map_err(|e| CumulusError::Storage(format!("writing '{filename}': {e}")))?;

        tracing::debug!(owner_id = owner_id, filename = %filename, "Blob written");
        Ok(())
    }

    /// Read a blob.
    ///
    /// Returns `Ok(None)` when the blob is missing so callers can decide
    /// whether absence is a plain miss or a metadata/blob divergence.
    pub fn read(&self, owner_id: i64, filename: &str) -> Result<Option<Vec<u8>>> {
        let path = self.blob_path(owner_id, filename)?;

        match fs::read(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CumulusError::Storage(format!("reading '{filename}': {e}"))),
        }
    }

    /// Rename a blob within the owner's namespace.
    ///
    /// Fails with `Storage` when the source is missing or the move fails;
    /// nothing is changed in that case.
    pub fn rename(&self, owner_id: i64, filename: &str, new_filename: &str) -> Result<()> {
        let from = self.blob_path(owner_id, filename)?;
        let to = self.blob_path(owner_id, new_filename)?;

        fs::rename(&from, &to).map_err(|e| {
            CumulusError::Storage(format!("renaming '{filename}' to '{new_filename}': {e}"))
        })?;

        tracing::debug!(
            owner_id = owner_id,
            from = %filename,
            to = %new_filename,
            "Blob renamed"
        );
        Ok(())
    }

    /// Remove a blob.
    ///
    /// Returns `true` if the blob was removed, `false` if it was already
    /// absent; a concurrent double-delete is not an error.
    pub fn remove(&self, owner_id: i64, filename: &str) -> Result<bool> {
        let path = self.blob_path(owner_id, filename)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CumulusError::Storage(format!("deleting '{filename}': {e}"))),
        }
    }

    /// Check if a blob exists.
    pub fn exists(&self, owner_id: i64, filename: &str) -> bool {
        self.blob_path(owner_id, filename)
            .map(|p| p.exists())
            .unwrap_or(false)
    }

    /// Directory holding one user's blobs.
    fn user_dir(&self, owner_id: i64) -> PathBuf {
        self.base_path.join(owner_id.to_string())
    }
}
