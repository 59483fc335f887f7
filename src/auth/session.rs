//! Session management
//!
//! Issues opaque session tokens at login and resolves them back to a
//! username on every request. Expired sessions are dropped lazily when
//! their token is next presented.

use rand::RngCore;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    expires_at: Instant,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Registry of active sessions keyed by token.
///
/// The server wraps this in `Arc<Mutex<..>>`; critical sections stay
/// short (a map lookup or insert).
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Creates a session for `username` and returns its fresh token.
    pub fn create(&mut self, username: &str, ttl: Duration) -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);

        self.sessions.insert(
            token.clone(),
            Session {
                username: username.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );

        token
    }

    /// Resolves a token to its username, dropping the session if expired.
    pub fn authenticate(&mut self, token: &str) -> Option<String> {
        match self.sessions.get(token) {
            Some(session) if !session.is_expired() => Some(session.username.clone()),
            Some(_) => {
                self.sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Removes a session, e.g. on logout.
    pub fn remove(&mut self, token: &str) -> Option<Session> {
        self.sessions.remove(token)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_authenticate() {
        let mut registry = SessionRegistry::new();
        let token = registry.create("alice", Duration::from_secs(60));
        assert_eq!(registry.authenticate(&token), Some("alice".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_tokens_are_unique() {
        let mut registry = SessionRegistry::new();
        let a = registry.create("alice", Duration::from_secs(60));
        let b = registry.create("alice", Duration::from_secs(60));
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let mut registry = SessionRegistry::new();
        assert_eq!(registry.authenticate("deadbeef"), None);
    }

    #[test]
    fn test_expired_session_is_dropped() {
        let mut registry = SessionRegistry::new();
        let token = registry.create("alice", Duration::ZERO);
        assert_eq!(registry.authenticate(&token), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_invalidates_token() {
        let mut registry = SessionRegistry::new();
        let token = registry.create("alice", Duration::from_secs(60));
        let removed = registry.remove(&token);
        assert_eq!(removed.map(|s| s.username), Some("alice".to_string()));
        assert_eq!(registry.authenticate(&token), None);
    }
}
