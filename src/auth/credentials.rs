//! Credential storage
//!
//! Indexes the users declared in configuration by username. Passwords are
//! never held in plaintext; only their SHA-256 digests are stored.

use std::collections::HashMap;

use crate::config::UserRecord;

/// In-memory credential store built once from configuration at startup.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    users: HashMap<String, String>,
}

impl CredentialStore {
    pub fn from_users(users: &[UserRecord]) -> Self {
        let users = users
            .iter()
            .map(|user| {
                (
                    user.username.clone(),
                    user.password_sha256.to_ascii_lowercase(),
                )
            })
            .collect();
        Self { users }
    }

    /// Stored password digest for a username, if the user exists.
    pub fn digest_for(&self, username: &str) -> Option<&str> {
        self.users.get(username).map(String::as_str)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
