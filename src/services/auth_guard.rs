//! Admin access guard
//!
//! Resolves the caller from a bearer credential and checks for the `admin`
//! role. The identity provider itself is out of scope; [`StaticTokenGuard`]
//! accepts the tokens listed in the site config.

use crate::models::AdminCredential;
use async_trait::async_trait;
use std::collections::HashMap;

pub const ADMIN_ROLE: &str = "admin";

/// Resolved caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub role: String,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Sign in required")]
    MissingCredential,

    #[error("Invalid or expired credential")]
    InvalidCredential,

    #[error("User '{0}' is not an administrator")]
    Forbidden(String),
}

#[async_trait]
pub trait AuthGuard: Send + Sync {
    /// Resolve the caller behind a credential
    async fn resolve(&self, credential: Option<&str>) -> Result<Identity, AuthError>;

    /// Resolve the caller and require the admin role
    async fn require_admin(&self, credential: Option<&str>) -> Result<Identity, AuthError> {
        let identity = self.resolve(credential).await?;
        if !identity.is_admin() {
            tracing::warn!(user_id = %identity.user_id, "Rejected non-admin caller");
            return Err(AuthError::Forbidden(identity.user_id));
        }
        Ok(identity)
    }
}

/// Guard backed by a fixed token table
#[derive(Debug, Clone, Default)]
pub struct StaticTokenGuard {
    tokens: HashMap<String, Identity>,
}

impl StaticTokenGuard {
    pub fn new(credentials: &[AdminCredential]) -> Self {
        let tokens = credentials
            .iter()
            .map(|c| {
                (
                    c.token.clone(),
                    Identity {
                        user_id: c.user_id.clone(),
                        role: c.role.clone(),
                    },
                )
            })
            .collect();
        Self { tokens }
    }
}

#[async_trait]
impl AuthGuard for StaticTokenGuard {
    async fn resolve(&self, credential: Option<&str>) -> Result<Identity, AuthError> {
        let token = credential
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingCredential)?;
        self.tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidCredential)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") {
        Some(token.trim())
    } else {
        None
    }
}
