//! # Authentication
//!
//! Checks operator credentials for a chosen role.
//!
//! The router only sees the [`Authenticator`] trait, so the credential table
//! can be swapped without touching the login loop.
//!
//! ```text
//! role + identity + secret ──► Authenticator ──► Operator { identity, role }
//!                                    │
//!                                    └──► AuthError::InvalidCredentials
//! ```

use tally_core::{Operator, Role};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid {} credentials.", credential_kind(.role))]
    InvalidCredentials { role: Role },
}

fn credential_kind(role: &Role) -> &'static str {
    match role {
        Role::Admin => "admin",
        Role::SalesRep => "sales",
    }
}

pub trait Authenticator {
    fn authenticate(&self, role: Role, identity: &str, secret: &str) -> Result<Operator, AuthError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Credential {
    identity: String,
    secret: String,
    role: Role,
}

/// In-memory credential table.
///
/// Sales identities and secrets are lower-cased before comparison; admin
/// credentials must match exactly.
#[derive(Debug, Clone)]
pub struct OperatorTable {
    credentials: Vec<Credential>,
}

impl OperatorTable {
    pub fn empty() -> Self {
        Self {
            credentials: Vec::new(),
        }
    }

    pub fn with(mut self, role: Role, identity: &str, secret: &str) -> Self {
        let (identity, secret) = normalise(role, identity, secret);
        self.credentials.push(Credential {
            identity,
            secret,
            role,
        });
        self
    }
}

impl Default for OperatorTable {
    /// One admin (`admin`/`admin`) and two sales reps (`user1`, `user2`,
    /// both with secret `user`).
    fn default() -> Self {
        OperatorTable::empty()
            .with(Role::Admin, "admin", "admin")
            .with(Role::SalesRep, "user1", "user")
            .with(Role::SalesRep, "user2", "user")
    }
}

fn normalise(role: Role, identity: &str, secret: &str) -> (String, String) {
    match role {
        Role::Admin => (identity.to_string(), secret.to_string()),
        Role::SalesRep => (identity.to_lowercase(), secret.to_lowercase()),
    }
}

impl Authenticator for OperatorTable {
    fn authenticate(&self, role: Role, identity: &str, secret: &str) -> Result<Operator, AuthError> {
        let (identity, secret) = normalise(role, identity.trim(), secret.trim());
        let matched = self
            .credentials
            .iter()
            .any(|c| c.role == role && c.identity == identity && c.secret == secret);

        if matched {
            info!(%role, %identity, "Operator authenticated");
            Ok(Operator { identity, role })
        } else {
            warn!(%role, %identity, "Authentication failed");
            Err(AuthError::InvalidCredentials { role })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_admin_is_case_sensitive() {
        let table = OperatorTable::default();
        let op = table.authenticate(Role::Admin, "admin", "admin").unwrap();
        assert_eq!(op.role, Role::Admin);

        assert_eq!(
            table.authenticate(Role::Admin, "Admin", "admin"),
            Err(AuthError::InvalidCredentials { role: Role::Admin })
        );
    }

    #[test]
    fn test_sales_reps_are_case_insensitive() {
        let table = OperatorTable::default();
        let op = table.authenticate(Role::SalesRep, "USER2", "User").unwrap();
        assert_eq!(op.identity, "user2");
        assert_eq!(op.role, Role::SalesRep);
    }

    #[test]
    fn test_role_must_match() {
        let table = OperatorTable::default();
        assert!(table.authenticate(Role::SalesRep, "admin", "admin").is_err());
        assert!(table.authenticate(Role::Admin, "user1", "user").is_err());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AuthError::InvalidCredentials { role: Role::Admin }.to_string(),
            "Invalid admin credentials."
        );
        assert_eq!(
            AuthError::InvalidCredentials { role: Role::SalesRep }.to_string(),
            "Invalid sales credentials."
        );
    }
}
