//! Authentication service for Cumulus.
//!
//! Composes the user repository, password verification, and the session
//! token table. This is the single place a raw token is turned into a user
//! identity; everything past this layer works with resolved users only.

use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::SessionManager;
use crate::db::{Database, NewUser, User, UserRepository};
use crate::{CumulusError, Result};

/// Authentication service: login, logout, and token resolution.
pub struct AuthService {
    db: Database,
    sessions: SessionManager,
}

impl AuthService {
    /// Create a new AuthService with an empty session table.
    ///
    /// The session table lives exactly as long as this service: created at
    /// process start, discarded at shutdown, never persisted.
    pub fn new(db: Database) -> Self {
        Self {
            db,
            sessions: SessionManager::new(),
        }
    }

    /// Register a new user.
    ///
    /// Hashes the password and inserts the user; fails with `Conflict` when
    /// the login is taken and `InvalidInput` when the password does not meet
    /// the length requirements.
    pub async fn register(&self, login: &str, password: &str) -> Result<User> {
        let login = login.trim();
        if login.is_empty() {
            return Err(CumulusError::InvalidInput("login is required".to_string()));
        }

        let hash =
            hash_password(password).map_err(|e| CumulusError::InvalidInput(e.to_string()))?;

        let repo = UserRepository::new(self.db.pool());
        let user = repo.create(&NewUser::new(login, hash)).await?;

        info!(user_id = user.id, login = %user.login, "User registered");
        Ok(user)
    }

    /// Log in with credentials, returning a new session token.
    ///
    /// Unknown login and wrong password both fail with `InvalidCredentials`
    /// so callers cannot probe which logins exist.
    pub async fn login(&self, login: &str, password: &str) -> Result<String> {
        let repo = UserRepository::new(self.db.pool());

        let user = match repo.get_by_login(login).await? {
            Some(user) => user,
            None => {
                warn!(login = %login, "Login failed: user not found");
                return Err(CumulusError::InvalidCredentials);
            }
        };

        if verify_password(password, &user.password).is_err() {
            warn!(login = %login, "Login failed: wrong password");
            return Err(CumulusError::InvalidCredentials);
        }

        let token = self.sessions.issue(user.id);
        info!(user_id = user.id, login = %login, "Login successful");
        Ok(token)
    }

    /// Resolve a token to the authenticated user.
    ///
    /// This is the single source of truth for "is this request
    /// authenticated": callers must treat a successful resolve as proof of
    /// identity. An unknown token is a normal outcome and maps to
    /// `Unauthenticated`.
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let user_id = self
            .sessions
            .resolve(token)
            .ok_or(CumulusError::Unauthenticated)?;

        let repo = UserRepository::new(self.db.pool());
        repo.get_by_id(user_id)
            .await?
            .ok_or(CumulusError::Unauthenticated)
    }

    /// Log out a session by token.
    ///
    /// Returns `true` if a session was revoked, `false` if the token was
    /// unknown.
    pub fn logout(&self, token: &str) -> bool {
        self.sessions.revoke(token).is_some()
    }

    /// Access the session table.
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup() -> AuthService {
        let db = Database::open_in_memory().await.unwrap();
        AuthService::new(db)
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let auth = setup().await;
        let user = auth.register("alice", "password123").await.unwrap();
        assert_eq!(user.login, "alice");

        let token = auth.login("alice", "password123").await.unwrap();
        let resolved = auth.authenticate(&token).await.unwrap();
        assert_eq!(resolved.id, user.id);
        assert_eq!(resolved.login, "alice");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let auth = setup().await;
        auth.register("alice", "password123").await.unwrap();

        let result = auth.login("alice", "wrong_password").await;
        assert!(matches!(result, Err(CumulusError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let auth = setup().await;
        let result = auth.login("ghost", "password123").await;
        assert!(matches!(result, Err(CumulusError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_token() {
        let auth = setup().await;
        let result = auth.authenticate("never-issued").await;
        assert!(matches!(result, Err(CumulusError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let auth = setup().await;
        auth.register("alice", "password123").await.unwrap();
        let token = auth.login("alice", "password123").await.unwrap();

        assert!(auth.logout(&token));
        assert!(!auth.logout(&token));

        let result = auth.authenticate(&token).await;
        assert!(matches!(result, Err(CumulusError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_register_blank_login() {
        let auth = setup().await;
        let result = auth.register("   ", "password123").await;
        assert!(matches!(result, Err(CumulusError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_register_short_password() {
        let auth = setup().await;
        let result = auth.register("alice", "short").await;
        assert!(matches!(result, Err(CumulusError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_register_duplicate_login() {
        let auth = setup().await;
        auth.register("alice", "password123").await.unwrap();
        let result = auth.register("alice", "password456").await;
        assert!(matches!(result, Err(CumulusError::Conflict(_))));
    }
}
