//! Session token management for Cumulus.
//!
//! Tokens are opaque UUID v4 strings mapped to a user id. They live from
//! issuance until explicit revocation or process restart; there is no
//! persistence and no expiry.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// In-memory session token table.
///
/// Each operation is independently atomic: the table is safe to share
/// between concurrent requests without callers holding any external lock.
/// Once `issue` returns, every subsequent `resolve` observes the mapping
/// until a `revoke` completes. Operations on different tokens never
/// interfere.
#[derive(Debug, Default)]
pub struct SessionManager {
    /// Active sessions: token -> user id.
    sessions: RwLock<HashMap<String, i64>>,
}

impl SessionManager {
    /// Create a new, empty session manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token for a user.
    ///
    /// The token is a 128-bit random UUID; collision handling beyond the
    /// generator's negligible collision probability is not required.
    pub fn issue(&self, user_id: i64) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.write().insert(token.clone(), user_id);

        info!(user_id = user_id, "Session issued");
        token
    }

    /// Resolve a token to its user id.
    ///
    /// Returns `None` for tokens that were never issued, already revoked,
    /// or lost to a restart. Callers treat a successful resolve as proof of
    /// identity; absence maps to an authentication failure, never to an
    /// anonymous user.
    pub fn resolve(&self, token: &str) -> Option<i64> {
        self.sessions.read().get(token).copied()
    }

    /// Revoke a token, returning the user id it was mapped to.
    ///
    /// Returns `None` when there was nothing to revoke, so callers can
    /// distinguish "logged out something" from "nothing to log out".
    pub fn revoke(&self, token: &str) -> Option<i64> {
        let removed = self.sessions.write().remove(token);

        match removed {
            Some(user_id) => info!(user_id = user_id, "Session revoked"),
            None => debug!("Revoke: token not found"),
        }
        removed
    }

    /// Get the number of active sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }
}
