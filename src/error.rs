// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! `AuthError` display strings double as the message the UI shows in its
//! modal when an explicit action (login, signup, upgrade, password change)
//! fails. Errors from passive background reconciliation (the profile repair
//! write, catalog fetches) are logged and absorbed, never shown.

use thiserror::Error;

/// Errors from the identity provider and explicit auth actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Email already in use")]
    EmailAlreadyInUse,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password is too weak")]
    WeakPassword,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("This account has been disabled")]
    UserDisabled,

    #[error("Too many attempts, try again later")]
    TooManyAttempts,

    #[error("No user is signed in")]
    NotSignedIn,

    #[error("Sign-out failed: {0}")]
    SignOut(String),

    #[error("Operation timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Auth provider error: {0}")]
    Provider(String),
}

impl AuthError {
    /// Map an Identity Toolkit error code to a typed error.
    ///
    /// Codes sometimes carry a detail suffix, e.g.
    /// `WEAK_PASSWORD : Password should be at least 6 characters`.
    pub fn from_provider_code(code: &str) -> Self {
        let code = code.split(':').next().unwrap_or(code).trim();
        match code {
            "EMAIL_EXISTS" => Self::EmailAlreadyInUse,
            "INVALID_EMAIL" | "MISSING_EMAIL" => Self::InvalidEmail,
            "WEAK_PASSWORD" | "MISSING_PASSWORD" => Self::WeakPassword,
            "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
                Self::InvalidCredentials
            }
            "USER_DISABLED" => Self::UserDisabled,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => Self::TooManyAttempts,
            other => Self::Provider(other.to_string()),
        }
    }
}

/// Profile store failure on the read path (unreachable or permission denied).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Profile read failed: {0}")]
pub struct ProfileReadError(pub String);

/// Profile store failure on the write path (unreachable or permission denied).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Profile write failed: {0}")]
pub struct ProfileWriteError(pub String);

/// Catalog fetch failure. Non-fatal: callers fall back to built-in data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Catalog fetch failed: {0}")]
pub struct CatalogFetchError(pub String);

/// Failure to establish the store connection at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Store connection failed: {0}")]
pub struct StoreConnectError(pub String);

/// Combined error for session operations that touch both the identity
/// provider and the profile store (signup, upgrade, photo update).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    ProfileRead(#[from] ProfileReadError),

    #[error(transparent)]
    ProfileWrite(#[from] ProfileWriteError),
}
