//! Credential gate over the dashboard's user table.
//!
//! A lookup plus digest comparison, not a full security system: there is
//! no salting, rate limiting, or session machinery. Verification happens
//! inside this module, so callers hand over the plaintext password and
//! never handle digests themselves.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Result type alias for authentication.
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Classified authentication failures, for user messaging.
///
/// The classification is deliberate (the UI words each case differently);
/// it is not a security measure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("user not found")]
    UserNotFound,

    #[error("wrong password")]
    WrongPassword,

    #[error("account is inactive")]
    Inactive,
}

/// A row of the user table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,

    /// Hex-encoded SHA-256 digest of the password.
    pub password_sha256: String,

    /// Inactive accounts fail authentication even with the right password.
    pub active: bool,
}

impl UserRecord {
    /// Builds a record from a plaintext password.
    pub fn new(username: impl Into<String>, password: &str, active: bool) -> Self {
        UserRecord {
            username: username.into(),
            password_sha256: sha256_hex(password),
            active,
        }
    }
}

/// The user table and its lookup rules.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<UserRecord>,
}

impl UserDirectory {
    pub fn new(users: Vec<UserRecord>) -> Self {
        UserDirectory { users }
    }

    /// Authenticates a user from a plaintext password.
    ///
    /// Hashing happens here, inside the trusted boundary. Username lookup
    /// is case-insensitive. Failures are classified in order: unknown
    /// user, wrong password, inactive account.
    pub fn authenticate(&self, username: &str, password: &str) -> AuthResult<&UserRecord> {
        self.verify_digest(username, &sha256_hex(password))
    }

    /// Verifies a caller-supplied hex SHA-256 digest.
    ///
    /// Kept for callers that already hold a digest; prefer
    /// [`authenticate`](Self::authenticate).
    pub fn verify_digest(&self, username: &str, digest: &str) -> AuthResult<&UserRecord> {
        let user = self
            .users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .ok_or(AuthError::UserNotFound)?;

        if !user.password_sha256.eq_ignore_ascii_case(digest) {
            return Err(AuthError::WrongPassword);
        }
        if !user.active {
            return Err(AuthError::Inactive);
        }
        Ok(user)
    }
}

/// Hex-encoded SHA-256 of the input.
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> UserDirectory {
        UserDirectory::new(vec![
            UserRecord::new("maria", "s3cret", true),
            UserRecord::new("joao", "hunter2", false),
        ])
    }

    #[test]
    fn test_successful_login() {
        let dir = directory();
        let user = dir.authenticate("maria", "s3cret").unwrap();
        assert_eq!(user.username, "maria");
    }

    #[test]
    fn test_username_case_insensitive() {
        let dir = directory();
        assert!(dir.authenticate("MARIA", "s3cret").is_ok());
        assert!(dir.authenticate("Maria", "s3cret").is_ok());
    }

    #[test]
    fn test_unknown_user() {
        let dir = directory();
        assert_eq!(
            dir.authenticate("nobody", "s3cret"),
            Err(AuthError::UserNotFound)
        );
    }

    #[test]
    fn test_wrong_password() {
        let dir = directory();
        assert_eq!(
            dir.authenticate("maria", "wrong"),
            Err(AuthError::WrongPassword)
        );
    }

    #[test]
    fn test_inactive_account() {
        let dir = directory();
        assert_eq!(
            dir.authenticate("joao", "hunter2"),
            Err(AuthError::Inactive)
        );
    }

    #[test]
    fn test_inactive_with_wrong_password_reports_password() {
        // Digest check runs before the active flag.
        let dir = directory();
        assert_eq!(
            dir.authenticate("joao", "wrong"),
            Err(AuthError::WrongPassword)
        );
    }

    #[test]
    fn test_digest_contract_preserved() {
        let dir = directory();
        let digest = sha256_hex("s3cret");
        assert!(dir.verify_digest("maria", &digest).is_ok());
        assert!(dir.verify_digest("maria", &digest.to_uppercase()).is_ok());
    }

    #[test]
    fn test_sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
