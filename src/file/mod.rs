//! File management for Cumulus: metadata records, blob storage, and the
//! consistency-keeping service on top of both.

pub mod record;
pub mod service;
pub mod store;

pub use record::{FileRecord, FileRecordRepository, NewFileRecord};
pub use service::FileStore;
pub use store::{validate_filename, BlobStore};
