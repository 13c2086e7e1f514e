// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity provider contract.
//!
//! The provider owns the authenticated principal; this crate only observes
//! it. [`IdentityWatch`] models the provider's auth-state stream: it always
//! holds the current identity (or `None`) and wakes observers on every
//! change. Dropping the watch unsubscribes.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::AuthError;

/// Authenticated principal issued by the identity provider.
///
/// Transient: exists only while a session is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub email: String,
}

/// Subscription to identity-change notifications.
pub struct IdentityWatch {
    rx: watch::Receiver<Option<Identity>>,
}

impl IdentityWatch {
    pub fn new(rx: watch::Receiver<Option<Identity>>) -> Self {
        Self { rx }
    }

    /// Current identity, marking the value as seen.
    pub fn current(&mut self) -> Option<Identity> {
        self.rx.borrow_and_update().clone()
    }

    /// Wait for the next identity change. `Err` means the provider has been
    /// dropped and no further notifications can arrive.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.rx.changed().await
    }
}

/// External authentication provider contract.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify credentials and activate a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Create a new identity and activate a session for it.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// End the active session.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Re-authenticate with `current` and replace the credential with `new`.
    async fn update_password(&self, current: &str, new: &str) -> Result<(), AuthError>;

    /// Send a password-reset email.
    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError>;

    /// Register for identity-change notifications for the lifetime of the
    /// returned watch.
    fn watch_identity(&self) -> IdentityWatch;
}
