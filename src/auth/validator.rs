//! Authentication validator
//!
//! Implements login credential validation against the configured user
//! store. Input sanitation runs before any lookup so malformed requests
//! never reach the credential comparison.

use sha2::{Digest, Sha256};

use crate::auth::credentials::CredentialStore;
use crate::config::ServerConfig;
use crate::error::AuthError;

/// Performs basic input sanitation to check for malicious or malformed usernames/passwords.
fn is_valid_input(input: &str, max_length: usize) -> bool {
    !input.trim().is_empty() && input.len() <= max_length && !input.contains(['\r', '\n', '\0'])
}

/// Hex-encoded SHA-256 digest of a password, as stored in configuration.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Validates a username/password pair against the credential store.
pub fn validate_credentials(
    store: &CredentialStore,
    config: &ServerConfig,
    username: &str,
    password: &str,
) -> Result<(), AuthError> {
    if !is_valid_input(username, config.max_username_length) {
        return Err(AuthError::MalformedInput("Invalid username format".into()));
    }

    if !is_valid_input(password, config.max_username_length) {
        return Err(AuthError::MalformedInput("Invalid password format".into()));
    }

    match store.digest_for(username) {
        Some(stored) if stored == hash_password(password) => Ok(()),
        Some(_) => Err(AuthError::InvalidPassword(username.to_string())),
        None => Err(AuthError::UserNotFound(username.to_string())),
    }
}
