//! User repository for Cumulus.

use chrono::Utc;
use sqlx::SqlitePool;

use super::user::{NewUser, User};
use crate::{CumulusError, Result};

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID, or `Conflict` when the
    /// login is already taken.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query("INSERT INTO users (login, password, created_at) VALUES (?, ?, ?)")
            .bind(&new_user.login)
            .bind(&new_user.password)
            .bind(Utc::now())
            .execute(self.pool)
            .await;

        let result = match result {
            Ok(r) => r,
            Err(e) if is_unique_violation(&e) => {
                return Err(CumulusError::Conflict(format!(
                    "login '{}' is already registered",
                    new_user.login
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| CumulusError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, login, password, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by login name.
    pub async fn get_by_login(&self, login: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, login, password, created_at FROM users WHERE login = ?",
        )
        .bind(login)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }
}

/// Check whether an sqlx error is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn setup() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let db = setup().await;
        let repo = UserRepository::new(db.pool());

        let created = repo.create(&NewUser::new("alice", "hash1")).await.unwrap();
        assert_eq!(created.login, "alice");
        assert!(created.id > 0);

        let by_id = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.login, "alice");

        let by_login = repo.get_by_login("alice").await.unwrap().unwrap();
        assert_eq!(by_login.id, created.id);
    }

    #[tokio::test]
    async fn test_get_unknown_user() {
        let db = setup().await;
        let repo = UserRepository::new(db.pool());

        assert!(repo.get_by_id(9999).await.unwrap().is_none());
        assert!(repo.get_by_login("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_login_is_conflict() {
        let db = setup().await;
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("alice", "hash1")).await.unwrap();
        let result = repo.create(&NewUser::new("alice", "hash2")).await;

        assert!(matches!(result, Err(CumulusError::Conflict(_))));
    }
}
