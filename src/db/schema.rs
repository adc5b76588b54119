//! Database schema migrations for Cumulus.
//!
//! Each entry is applied once, in order, inside a transaction. The current
//! version is tracked in the `schema_version` table.

/// All schema migrations, in order.
pub const MIGRATIONS: &[&str] = &[
    // v1: users and files
    "CREATE TABLE users (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        login       TEXT NOT NULL UNIQUE,
        password    TEXT NOT NULL,
        created_at  TEXT NOT NULL
    );

    CREATE TABLE files (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        filename    TEXT NOT NULL,
        size        INTEGER NOT NULL,
        created_at  TEXT NOT NULL,
        UNIQUE (owner_id, filename)
    );

    CREATE INDEX idx_files_owner_id ON files(owner_id);",
];
